//! Itemized expenses to be split.

use serde::Serialize;

use crate::MoneyCents;

/// A single paid expense.
///
/// `participant_ids` is conceptually a set but its order matters: when the
/// amount does not divide evenly, the leading ids absorb the extra cents
/// (see [`compute_balances`]). The engine never mutates the list.
///
/// [`compute_balances`]: crate::compute_balances
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Expense {
    pub id: String,
    /// May be empty.
    pub description: String,
    /// Must be a positive amount; violations fail the whole computation.
    pub amount_cents: MoneyCents,
    pub payer_id: String,
    /// Who shares the cost. Non-empty; order drives remainder assignment.
    pub participant_ids: Vec<String>,
}
