use chrono::Utc;
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{Admin, CalculationSnapshot, ResultStore, StoreError, admins, token};

use super::{MAX_NAME_LEN, Store, normalize_required_name, required_name_key, with_tx};

/// Outcome of checking a request's admin token against a calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAccess {
    /// The calculation has no admins; everyone may edit.
    Open,
    /// The provided token matched one of the admins.
    Granted,
    /// The calculation has admins but no token was provided.
    MissingToken,
    /// A token was provided but matched no admin.
    InvalidToken,
}

impl EditAccess {
    pub fn can_edit(self) -> bool {
        matches!(self, Self::Open | Self::Granted)
    }
}

impl Store {
    /// List the admins of a calculation, oldest first.
    pub async fn admins(&self, token: &str) -> ResultStore<Vec<Admin>> {
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let models = admins::Entity::find()
                .filter(admins::Column::CalculationId.eq(calculation.id))
                .order_by_asc(admins::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(Admin::from).collect())
        })
    }

    /// Check a candidate admin token against a calculation's admins.
    pub async fn verify_admin_token(
        &self,
        token: &str,
        candidate: Option<&str>,
    ) -> ResultStore<EditAccess> {
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let models = admins::Entity::find()
                .filter(admins::Column::CalculationId.eq(calculation.id))
                .all(&db_tx)
                .await?;
            if models.is_empty() {
                return Ok(EditAccess::Open);
            }
            let Some(candidate) = candidate else {
                return Ok(EditAccess::MissingToken);
            };
            let granted = models
                .iter()
                .any(|admin| token::verify_token(candidate, &admin.token_hash));
            if granted {
                Ok(EditAccess::Granted)
            } else {
                Ok(EditAccess::InvalidToken)
            }
        })
    }

    /// Grant edit access to a new admin.
    ///
    /// Returns the fresh snapshot, the new admin and their plaintext token.
    pub async fn add_admin(
        &self,
        token: &str,
        name: &str,
    ) -> ResultStore<(CalculationSnapshot, Admin, String)> {
        let name = normalize_required_name(name, "admin", MAX_NAME_LEN)?;
        let key = required_name_key(&name, "admin")?;
        let admin_token = token::new_admin_token();

        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;

            let taken = admins::Entity::find()
                .filter(admins::Column::CalculationId.eq(calculation.id))
                .filter(admins::Column::NameNorm.eq(key.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(StoreError::DuplicateName(name.clone()));
            }

            let model = admins::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                calculation_id: ActiveValue::Set(calculation.id),
                name: ActiveValue::Set(name.clone()),
                name_norm: ActiveValue::Set(key.clone()),
                token_hash: ActiveValue::Set(token::hash_token(&admin_token)),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            let snapshot = self.load_snapshot(&db_tx, calculation).await?;
            Ok((snapshot, Admin::from(model), admin_token))
        })
    }

    /// Revoke an admin. The last admin cannot be removed.
    pub async fn remove_admin(
        &self,
        token: &str,
        admin_id: Uuid,
    ) -> ResultStore<CalculationSnapshot> {
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let admin = self
                .require_admin_in_calculation(&db_tx, calculation.id, admin_id)
                .await?;

            let count = admins::Entity::find()
                .filter(admins::Column::CalculationId.eq(calculation.id))
                .count(&db_tx)
                .await?;
            if count <= 1 {
                return Err(StoreError::LastAdmin);
            }

            admins::Entity::delete_by_id(admin.id).exec(&db_tx).await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }
}
