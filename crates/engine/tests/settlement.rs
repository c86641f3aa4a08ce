use engine::{
    EngineError, Expense, MoneyCents, Participant, compute_balances, compute_summary,
    compute_transfers,
};

fn trio() -> Vec<Participant> {
    vec![
        Participant::new("a", "Anna"),
        Participant::new("b", "Bruno"),
        Participant::new("c", "Carla"),
    ]
}

fn expense(id: &str, amount: i64, payer: &str, shared: &[&str]) -> Expense {
    Expense {
        id: id.to_string(),
        description: String::new(),
        amount_cents: MoneyCents::new(amount),
        payer_id: payer.to_string(),
        participant_ids: shared.iter().map(ToString::to_string).collect(),
    }
}

fn balance_of(summary: &engine::Summary, id: &str) -> i64 {
    summary
        .balances
        .iter()
        .find(|balance| balance.participant_id == id)
        .map(|balance| balance.balance_cents.cents())
        .unwrap()
}

#[test]
fn even_split_with_payer_included() {
    let summary = compute_summary(&trio(), &[expense("e1", 3000, "a", &["a", "b", "c"])]).unwrap();

    assert_eq!(balance_of(&summary, "a"), 2000);
    assert_eq!(balance_of(&summary, "b"), -1000);
    assert_eq!(balance_of(&summary, "c"), -1000);
    assert_eq!(summary.transfers.len(), 2);
    assert_eq!(summary.transfers[0].from_id, "b");
    assert_eq!(summary.transfers[0].to_id, "a");
    assert_eq!(summary.transfers[0].amount_cents.cents(), 1000);
    assert_eq!(summary.transfers[1].from_id, "c");
    assert_eq!(summary.transfers[1].to_id, "a");
    assert_eq!(summary.transfers[1].amount_cents.cents(), 1000);
}

#[test]
fn payer_excluded_from_share_list() {
    let summary = compute_summary(&trio(), &[expense("e1", 3000, "a", &["b", "c"])]).unwrap();

    assert_eq!(balance_of(&summary, "a"), 3000);
    assert_eq!(balance_of(&summary, "b"), -1500);
    assert_eq!(balance_of(&summary, "c"), -1500);
    assert_eq!(summary.transfers.len(), 2);
}

#[test]
fn remainder_cent_goes_to_first_listed() {
    let summary = compute_summary(&trio(), &[expense("e1", 100, "a", &["a", "b", "c"])]).unwrap();

    assert_eq!(balance_of(&summary, "a"), 66);
    assert_eq!(balance_of(&summary, "b"), -33);
    assert_eq!(balance_of(&summary, "c"), -33);
    let sum: i64 = summary
        .balances
        .iter()
        .map(|balance| balance.balance_cents.cents())
        .sum();
    assert_eq!(sum, 0);
}

#[test]
fn unknown_payer_counts_in_total_but_not_in_balances() {
    let summary = compute_summary(&trio(), &[expense("e1", 4200, "ghost", &["a", "b"])]).unwrap();

    assert_eq!(summary.total_expenses_cents.cents(), 4200);
    assert!(
        summary
            .balances
            .iter()
            .all(|balance| balance.balance_cents.is_zero())
    );
    assert!(
        summary
            .transfers
            .iter()
            .all(|transfer| transfer.from_id != "ghost" && transfer.to_id != "ghost")
    );
}

#[test]
fn balanced_group_needs_no_transfers() {
    let summary = compute_summary(
        &trio(),
        &[
            expense("e1", 900, "a", &["a", "b", "c"]),
            expense("e2", 900, "b", &["a", "b", "c"]),
            expense("e3", 900, "c", &["a", "b", "c"]),
        ],
    )
    .unwrap();

    assert!(
        summary
            .balances
            .iter()
            .all(|balance| balance.balance_cents.is_zero())
    );
    assert!(summary.transfers.is_empty());
}

#[test]
fn zero_sum_invariant_holds_for_mixed_expenses() {
    let participants: Vec<Participant> = ('a'..='f')
        .zip(["Anna", "Bruno", "Carla", "Dino", "Elsa", "Febo"])
        .map(|(id, name)| Participant::new(id, name))
        .collect();

    let expenses = [
        expense("e1", 10_001, "a", &["a", "b", "c", "d", "e", "f"]),
        expense("e2", 333, "b", &["c", "d"]),
        expense("e3", 7, "c", &["a", "b", "c"]),
        expense("e4", 99_999, "d", &["e", "f"]),
        expense("e5", 250, "e", &["e"]),
    ];

    let balances = compute_balances(&participants, &expenses).unwrap();
    let sum: i64 = balances.values().map(|balance| balance.cents()).sum();
    assert_eq!(sum, 0);
}

#[test]
fn split_shares_sum_to_amount_exactly() {
    for amount in [1, 2, 99, 100, 101, 1000, 99_999] {
        for n in 1..=6 {
            let participants: Vec<Participant> = (0..n)
                .map(|i| Participant::new(format!("p{i}"), format!("P{i}")))
                .collect();
            let ids: Vec<&str> = participants.iter().map(|p| p.id.as_str()).collect();
            let balances =
                compute_balances(&participants, &[expense("e1", amount, "p0", &ids)]).unwrap();

            // Payer credit cancels against the shares, so the payer's balance
            // is amount minus its own share and the rest are pure debits.
            let debited: i64 = balances
                .iter()
                .filter(|(id, _)| *id != "p0")
                .map(|(_, balance)| -balance.cents())
                .sum();
            let payer_share = amount - balances["p0"].cents();
            assert_eq!(debited + payer_share, amount);
        }
    }
}

#[test]
fn repeated_runs_are_deterministic() {
    let participants = trio();
    let expenses = [
        expense("e1", 101, "a", &["b", "c"]),
        expense("e2", 1000, "b", &["a", "b", "c"]),
    ];

    let first = compute_summary(&participants, &expenses).unwrap();
    for _ in 0..5 {
        let again = compute_summary(&participants, &expenses).unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn transfer_conservation_per_participant() {
    let participants = trio();
    let expenses = [
        expense("e1", 101, "a", &["a", "b", "c"]),
        expense("e2", 5000, "b", &["a", "c"]),
        expense("e3", 77, "c", &["b"]),
    ];

    let balances = compute_balances(&participants, &expenses).unwrap();
    let transfers = compute_transfers(&participants, &balances);

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
        assert_eq!(
            incoming - outgoing,
            balances[&participant.id].cents(),
            "participant {} not settled",
            participant.id
        );
    }
}

#[test]
fn invalid_amount_rejects_whole_summary() {
    let err = compute_summary(
        &trio(),
        &[
            expense("e1", 1000, "a", &["a", "b"]),
            expense("e2", 0, "b", &["a", "b"]),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidAmount("expense e2 has non-positive amount_cents".to_string())
    );
}

#[test]
fn inputs_are_not_mutated() {
    let participants = trio();
    let expenses = vec![expense("e1", 100, "a", &["c", "b", "a"])];
    let participants_before = participants.clone();
    let expenses_before = expenses.clone();

    compute_summary(&participants, &expenses).unwrap();

    assert_eq!(participants, participants_before);
    assert_eq!(expenses, expenses_before);
}
