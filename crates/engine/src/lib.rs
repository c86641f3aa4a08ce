//! Settlement engine for shared group expenses.
//!
//! Pure functions over `(participants, expenses)`: no I/O, no storage
//! knowledge, no shared state. [`compute_balances`] nets out who owes whom
//! using exact integer cents with deterministic remainder rounding,
//! [`compute_transfers`] reduces the balances to a short list of settling
//! payments, and [`compute_summary`] assembles both with the total spend.
//!
//! Callers own the input lists; the engine never mutates them, so concurrent
//! invocations on different snapshots need no coordination.

pub use balances::{Balance, compute_balances};
pub use error::EngineError;
pub use expenses::Expense;
pub use money::MoneyCents;
pub use participants::Participant;
pub use summary::{Summary, compute_summary};
pub use transfers::{Transfer, compute_transfers};

mod balances;
mod error;
mod expenses;
mod money;
mod participants;
mod summary;
mod transfers;

pub type ResultEngine<T> = Result<T, EngineError>;
