//! Assembly of the full settlement summary.

use serde::Serialize;

use crate::{Balance, Expense, MoneyCents, Participant, ResultEngine, Transfer};
use crate::{compute_balances, compute_transfers};

/// Everything a client needs to display a calculation: the total spend, one
/// balance per participant and the settling transfers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_expenses_cents: MoneyCents,
    /// One entry per input participant, in input order. Sorting for display
    /// is a presentation concern.
    pub balances: Vec<Balance>,
    pub transfers: Vec<Transfer>,
}

/// Computes balances and transfers and assembles the [`Summary`].
///
/// `total_expenses_cents` is the raw sum over all expenses, including any
/// skipped during balancing: total spend is independent of who covers it.
///
/// # Errors
///
/// Propagates [`EngineError::InvalidAmount`] from the balance pass.
///
/// [`EngineError::InvalidAmount`]: crate::EngineError::InvalidAmount
pub fn compute_summary(
    participants: &[Participant],
    expenses: &[Expense],
) -> ResultEngine<Summary> {
    let balances_by_id = compute_balances(participants, expenses)?;

    let balances = participants
        .iter()
        .map(|participant| Balance {
            participant_id: participant.id.clone(),
            name: participant.name.clone(),
            balance_cents: balances_by_id
                .get(&participant.id)
                .copied()
                .unwrap_or(MoneyCents::ZERO),
        })
        .collect();

    let total_expenses_cents = expenses
        .iter()
        .fold(MoneyCents::ZERO, |total, expense| total + expense.amount_cents);

    let transfers = compute_transfers(participants, &balances_by_id);

    Ok(Summary {
        total_expenses_cents,
        balances,
        transfers,
    })
}
