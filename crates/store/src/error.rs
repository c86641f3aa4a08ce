//! The module contains the errors the store can throw.
//!
//! The errors are:
//!
//! - [`CalculationNotFound`] thrown when no calculation matches a share token.
//! - [`DuplicateName`] thrown when a participant or admin name is already
//!   taken (case- and accent-insensitive) inside a calculation.
//! - [`LastAdmin`] thrown when removing the only remaining admin.
//!
//! [`CalculationNotFound`]: StoreError::CalculationNotFound
//! [`DuplicateName`]: StoreError::DuplicateName
//! [`LastAdmin`]: StoreError::LastAdmin
use engine::EngineError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Calculation not found")]
    CalculationNotFound,
    #[error("Participant not found")]
    ParticipantNotFound,
    #[error("Expense not found")]
    ExpenseNotFound,
    #[error("Admin not found")]
    AdminNotFound,
    #[error("Name \"{0}\" already taken")]
    DuplicateName(String),
    #[error("Unknown participant: {0}")]
    UnknownParticipant(Uuid),
    #[error("Participant still pays for {0} expense(s)")]
    ParticipantIsPayer(u64),
    #[error("Cannot remove the last admin")]
    LastAdmin,
    #[error("Too many participants (max {0})")]
    TooManyParticipants(usize),
    #[error("At least one participant is required")]
    NoParticipants,
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("An expense needs at least one sharing participant")]
    EmptyShares,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<EngineError> for StoreError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidAmount(msg) => Self::InvalidAmount(msg),
        }
    }
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::CalculationNotFound, Self::CalculationNotFound) => true,
            (Self::ParticipantNotFound, Self::ParticipantNotFound) => true,
            (Self::ExpenseNotFound, Self::ExpenseNotFound) => true,
            (Self::AdminNotFound, Self::AdminNotFound) => true,
            (Self::DuplicateName(a), Self::DuplicateName(b)) => a == b,
            (Self::UnknownParticipant(a), Self::UnknownParticipant(b)) => a == b,
            (Self::ParticipantIsPayer(a), Self::ParticipantIsPayer(b)) => a == b,
            (Self::LastAdmin, Self::LastAdmin) => true,
            (Self::TooManyParticipants(a), Self::TooManyParticipants(b)) => a == b,
            (Self::NoParticipants, Self::NoParticipants) => true,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::EmptyShares, Self::EmptyShares) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
