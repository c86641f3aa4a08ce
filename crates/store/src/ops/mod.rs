use sea_orm::DatabaseConnection;

use crate::{ResultStore, StoreError, util};

mod access;
mod admins;
mod calculations;
mod expenses;
mod participants;

pub use admins::EditAccess;
pub use expenses::ExpenseInput;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

pub const MAX_PARTICIPANTS: usize = 50;
pub const MAX_GROUP_NAME_LEN: usize = 80;
pub const MAX_NAME_LEN: usize = 40;
pub const MAX_DESCRIPTION_LEN: usize = 120;
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000;

#[derive(Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }
}

/// Validate a group or person name: non-blank after whitespace collapsing,
/// at most `max_len` characters.
fn normalize_required_name(value: &str, label: &str, max_len: usize) -> ResultStore<String> {
    let name = util::normalize_display_name(value)
        .ok_or_else(|| StoreError::InvalidName(format!("{label} name must not be empty")))?;
    if name.chars().count() > max_len {
        return Err(StoreError::InvalidName(format!(
            "{label} name must be at most {max_len} characters"
        )));
    }
    Ok(name)
}

/// A name's uniqueness key; blank-folding names are invalid.
fn required_name_key(name: &str, label: &str) -> ResultStore<String> {
    util::normalize_name_key(name)
        .ok_or_else(|| StoreError::InvalidName(format!("{label} name must contain a letter or digit")))
}

fn normalize_description(value: Option<&str>) -> ResultStore<String> {
    let description = value.map(str::trim).unwrap_or("").to_string();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(StoreError::InvalidName(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(description)
}

/// The builder for `Store`
#[derive(Default)]
pub struct StoreBuilder {
    database: DatabaseConnection,
}

impl StoreBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> StoreBuilder {
        self.database = db;
        self
    }

    /// Construct `Store`
    pub async fn build(self) -> ResultStore<Store> {
        Ok(Store {
            database: self.database,
        })
    }
}
