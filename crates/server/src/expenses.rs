//! Expense API endpoints.

use api_types::calculation::CalculationResponse;
use api_types::expense::ExpenseUpsert;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use uuid::Uuid;

use crate::{
    ServerError,
    server::{AdminQuery, AdminTokenHeader, ServerState, admin_candidate, require_edit},
    views,
};
use store::ExpenseInput;

fn expense_input(payload: ExpenseUpsert) -> ExpenseInput {
    ExpenseInput {
        description: payload.description,
        amount_cents: payload.amount_cents,
        payer_id: payload.payer_id,
        participant_ids: payload.participant_ids,
    }
}

/// Handle requests for logging a new expense.
pub async fn create(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<(StatusCode, Json<CalculationResponse>), ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let snapshot = state
        .store
        .add_expense(&token, expense_input(payload))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(views::calculation_response(&snapshot)?),
    ))
}

/// Handle requests for replacing an expense.
pub async fn update(
    State(state): State<ServerState>,
    Path((token, expense_id)): Path<(String, Uuid)>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<Json<CalculationResponse>, ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let snapshot = state
        .store
        .update_expense(&token, expense_id, expense_input(payload))
        .await?;
    views::calculation_response(&snapshot).map(Json)
}

/// Handle requests for deleting an expense.
pub async fn remove(
    State(state): State<ServerState>,
    Path((token, expense_id)): Path<(String, Uuid)>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<CalculationResponse>, ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let snapshot = state.store.remove_expense(&token, expense_id).await?;
    views::calculation_response(&snapshot).map(Json)
}
