//! View-model assembly shared by the calculation endpoints.

use api_types::admin::AdminView;
use api_types::calculation::{CalculationResponse, CalculationView};
use api_types::expense::ExpenseView;
use api_types::participant::ParticipantView;
use api_types::summary::{BalanceView, SummaryView, TransferView};
use engine::Summary;
use store::{Admin, CalculationSnapshot};

use crate::ServerError;

pub(crate) fn calculation_view(snapshot: &CalculationSnapshot) -> CalculationView {
    CalculationView {
        token: snapshot.calculation.token.clone(),
        group_name: snapshot.calculation.group_name.clone(),
        participants: snapshot
            .participants
            .iter()
            .map(|p| ParticipantView {
                id: p.id,
                name: p.name.clone(),
            })
            .collect(),
        expenses: snapshot
            .expenses
            .iter()
            .map(|e| ExpenseView {
                id: e.id,
                description: e.description.clone(),
                amount_cents: e.amount_cents,
                payer_id: e.payer_id,
                participant_ids: e.participant_ids.clone(),
                created_at: e.created_at,
            })
            .collect(),
        admins: snapshot.admins.iter().map(admin_view).collect(),
        created_at: snapshot.calculation.created_at,
        updated_at: snapshot.calculation.updated_at,
    }
}

pub(crate) fn admin_view(admin: &Admin) -> AdminView {
    AdminView {
        id: admin.id,
        name: admin.name.clone(),
        created_at: admin.created_at,
    }
}

pub(crate) fn summary_view(summary: &Summary) -> SummaryView {
    SummaryView {
        total_expenses_cents: summary.total_expenses_cents.cents(),
        balances: summary
            .balances
            .iter()
            .map(|b| BalanceView {
                participant_id: b.participant_id.clone(),
                name: b.name.clone(),
                balance_cents: b.balance_cents.cents(),
            })
            .collect(),
        transfers: summary
            .transfers
            .iter()
            .map(|t| TransferView {
                from_id: t.from_id.clone(),
                from_name: t.from_name.clone(),
                to_id: t.to_id.clone(),
                to_name: t.to_name.clone(),
                amount_cents: t.amount_cents.cents(),
            })
            .collect(),
    }
}

/// The `{ calculation, summary }` envelope every mutation responds with.
pub(crate) fn calculation_response(
    snapshot: &CalculationSnapshot,
) -> Result<CalculationResponse, ServerError> {
    Ok(CalculationResponse {
        calculation: calculation_view(snapshot),
        summary: summary_view(&snapshot.summary()?),
    })
}
