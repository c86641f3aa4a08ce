//! Greedy reduction of balances into settling transfers.

use std::collections::HashMap;

use serde::Serialize;

use crate::{MoneyCents, Participant};

/// A recommended payment from one participant to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from_id: String,
    pub from_name: String,
    pub to_id: String,
    pub to_name: String,
    pub amount_cents: MoneyCents,
}

/// Reduces net balances to a list of transfers that settle every debt.
///
/// Participants with positive balance become creditors, negative become
/// debtors (tracked as a positive owed amount); zero balances take no part.
/// Both lists are sorted descending by magnitude with a stable sort, so ties
/// keep the input participant order and the output is reproducible. A
/// two-pointer sweep then matches the largest debtor against the largest
/// creditor with `min(owed, balance)` until one side runs out.
///
/// Greedy, not minimal-cardinality: provably minimal transfer counts are a
/// harder combinatorial problem and out of scope. When the balances sum to
/// zero the sweep leaves every balance settled.
pub fn compute_transfers(
    participants: &[Participant],
    balances: &HashMap<String, MoneyCents>,
) -> Vec<Transfer> {
    let mut creditors: Vec<(&Participant, i64)> = Vec::new();
    let mut debtors: Vec<(&Participant, i64)> = Vec::new();

    for participant in participants {
        let Some(balance) = balances.get(&participant.id) else {
            continue;
        };
        if balance.is_positive() {
            creditors.push((participant, balance.cents()));
        } else if balance.is_negative() {
            debtors.push((participant, balance.abs().cents()));
        }
    }

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);

        if amount > 0 {
            transfers.push(Transfer {
                from_id: debtors[i].0.id.clone(),
                from_name: debtors[i].0.name.clone(),
                to_id: creditors[j].0.id.clone(),
                to_name: creditors[j].0.name.clone(),
                amount_cents: MoneyCents::new(amount),
            });
        }

        debtors[i].1 -= amount;
        creditors[j].1 -= amount;

        if debtors[i].1 == 0 {
            i += 1;
        }
        if creditors[j].1 == 0 {
            j += 1;
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, i64)]) -> HashMap<String, MoneyCents> {
        entries
            .iter()
            .map(|(id, cents)| (id.to_string(), MoneyCents::new(*cents)))
            .collect()
    }

    fn people(ids: &[(&str, &str)]) -> Vec<Participant> {
        ids.iter()
            .map(|(id, name)| Participant::new(*id, *name))
            .collect()
    }

    #[test]
    fn single_creditor_collects_from_all_debtors() {
        let participants = people(&[("a", "Anna"), ("b", "Bruno"), ("c", "Carla")]);
        let transfers = compute_transfers(
            &participants,
            &balances(&[("a", 2000), ("b", -1000), ("c", -1000)]),
        );

        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].from_id, "b");
        assert_eq!(transfers[0].to_id, "a");
        assert_eq!(transfers[0].amount_cents, MoneyCents::new(1000));
        assert_eq!(transfers[1].from_id, "c");
        assert_eq!(transfers[1].to_id, "a");
        assert_eq!(transfers[1].amount_cents, MoneyCents::new(1000));
    }

    #[test]
    fn largest_debtor_pays_largest_creditor_first() {
        let participants = people(&[("a", "Anna"), ("b", "Bruno"), ("c", "Carla"), ("d", "Dino")]);
        let transfers = compute_transfers(
            &participants,
            &balances(&[("a", 500), ("b", 1500), ("c", -1800), ("d", -200)]),
        );

        assert_eq!(
            transfers,
            vec![
                Transfer {
                    from_id: "c".to_string(),
                    from_name: "Carla".to_string(),
                    to_id: "b".to_string(),
                    to_name: "Bruno".to_string(),
                    amount_cents: MoneyCents::new(1500),
                },
                Transfer {
                    from_id: "c".to_string(),
                    from_name: "Carla".to_string(),
                    to_id: "a".to_string(),
                    to_name: "Anna".to_string(),
                    amount_cents: MoneyCents::new(300),
                },
                Transfer {
                    from_id: "d".to_string(),
                    from_name: "Dino".to_string(),
                    to_id: "a".to_string(),
                    to_name: "Anna".to_string(),
                    amount_cents: MoneyCents::new(200),
                },
            ]
        );
    }

    #[test]
    fn equal_amounts_advance_both_sides() {
        let participants = people(&[("a", "Anna"), ("b", "Bruno"), ("c", "Carla"), ("d", "Dino")]);
        let transfers = compute_transfers(
            &participants,
            &balances(&[("a", 700), ("b", -700), ("c", 300), ("d", -300)]),
        );

        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].from_id, "b");
        assert_eq!(transfers[0].to_id, "a");
        assert_eq!(transfers[1].from_id, "d");
        assert_eq!(transfers[1].to_id, "c");
    }

    #[test]
    fn ties_keep_participant_order() {
        let participants = people(&[("a", "Anna"), ("b", "Bruno"), ("c", "Carla")]);
        let transfers = compute_transfers(
            &participants,
            &balances(&[("a", -500), ("b", -500), ("c", 1000)]),
        );

        // Equal owed amounts: "a" comes first in the input order.
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].from_id, "a");
        assert_eq!(transfers[1].from_id, "b");
    }

    #[test]
    fn balanced_state_produces_no_transfers() {
        let participants = people(&[("a", "Anna"), ("b", "Bruno")]);
        let transfers = compute_transfers(&participants, &balances(&[("a", 0), ("b", 0)]));
        assert!(transfers.is_empty());
    }

    #[test]
    fn transfers_conserve_every_balance() {
        let participants = people(&[("a", "Anna"), ("b", "Bruno"), ("c", "Carla"), ("d", "Dino")]);
        let input = balances(&[("a", 1234), ("b", -1000), ("c", 766), ("d", -1000)]);
        let transfers = compute_transfers(&participants, &input);

        for participant in &participants {
            let outgoing: i64 = transfers
                .iter()
                .filter(|transfer| transfer.from_id == participant.id)
                .map(|transfer| transfer.amount_cents.cents())
                .sum();
            let incoming: i64 = transfers
                .iter()
                .filter(|transfer| transfer.to_id == participant.id)
                .map(|transfer| transfer.amount_cents.cents())
                .sum();
            assert_eq!(incoming - outgoing, input[&participant.id].cents());
        }
        assert!(transfers.iter().all(|t| t.amount_cents.is_positive()));
    }
}
