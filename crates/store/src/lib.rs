//! Persistence for calculations, participants, expenses and admins.
//!
//! All database access lives behind [`Store`]. Reads hand out a full
//! [`CalculationSnapshot`]; settlement math is delegated to the pure
//! [`engine`] crate via [`CalculationSnapshot::summary`]. Every mutation
//! runs in one transaction and returns the post-mutation snapshot.

pub use admins::Admin;
pub use calculations::{Calculation, CalculationSnapshot};
pub use error::StoreError;
pub use expenses::Expense;
pub use ops::{
    EditAccess, ExpenseInput, MAX_AMOUNT_CENTS, MAX_DESCRIPTION_LEN, MAX_GROUP_NAME_LEN,
    MAX_NAME_LEN, MAX_PARTICIPANTS, Store, StoreBuilder,
};
pub use participants::Participant;

mod admins;
mod calculations;
mod error;
mod expense_shares;
mod expenses;
mod ops;
mod participants;
mod token;
mod util;

type ResultStore<T> = Result<T, StoreError>;
