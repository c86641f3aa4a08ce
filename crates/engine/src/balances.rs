//! Per-participant balance computation.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{EngineError, Expense, MoneyCents, Participant, ResultEngine};

/// Net position of one participant.
///
/// Positive = net creditor (should receive), negative = net debtor (should
/// pay), zero = settled. For any expense set with valid references the
/// balances of all participants sum to zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub participant_id: String,
    pub name: String,
    pub balance_cents: MoneyCents,
}

/// Computes the net balance of every participant.
///
/// Expenses are applied in input order. For each expense the payer is
/// credited the full amount, then the amount is split across the expense's
/// participants: `base = floor(amount / n)`, and the first `amount mod n`
/// ids in list order are debited `base + 1` while the rest are debited
/// `base`. The split always sums to the amount exactly, and the remainder
/// cents land on the same leading participants on every run.
///
/// Expenses whose payer is unknown, or whose participant list contains no
/// known id, are skipped without error: the storage layer validates
/// references upstream and this keeps a half-edited calculation readable
/// instead of failing the whole summary.
///
/// # Errors
///
/// [`EngineError::InvalidAmount`] if any expense has a non-positive
/// `amount_cents`. This is a caller-contract violation and fails fast, even
/// when the expense would otherwise have been skipped.
pub fn compute_balances(
    participants: &[Participant],
    expenses: &[Expense],
) -> ResultEngine<HashMap<String, MoneyCents>> {
    let mut balances: HashMap<String, MoneyCents> = participants
        .iter()
        .map(|participant| (participant.id.clone(), MoneyCents::ZERO))
        .collect();
    let known: HashSet<&str> = participants
        .iter()
        .map(|participant| participant.id.as_str())
        .collect();

    for expense in expenses {
        if !expense.amount_cents.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "expense {} has non-positive amount_cents",
                expense.id
            )));
        }

        if !known.contains(expense.payer_id.as_str()) {
            continue;
        }

        let charged: Vec<&str> = expense
            .participant_ids
            .iter()
            .map(String::as_str)
            .filter(|id| known.contains(id))
            .collect();
        if charged.is_empty() {
            continue;
        }

        if let Some(balance) = balances.get_mut(expense.payer_id.as_str()) {
            *balance += expense.amount_cents;
        }

        let count = charged.len() as i64;
        let base_share = expense.amount_cents.cents() / count;
        let remainder = expense.amount_cents.cents() % count;

        for (index, id) in charged.iter().enumerate() {
            let share = base_share + if (index as i64) < remainder { 1 } else { 0 };
            if let Some(balance) = balances.get_mut(*id) {
                *balance -= MoneyCents::new(share);
            }
        }
    }

    Ok(balances)
}
