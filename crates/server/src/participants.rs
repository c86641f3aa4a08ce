//! Participant API endpoints.

use api_types::calculation::CalculationResponse;
use api_types::participant::ParticipantNew;
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

/// Handle requests for adding a participant to a calculation.
pub async fn create(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
    Json(payload): Json<ParticipantNew>,
) -> Result<(StatusCode, Json<CalculationResponse>), ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let snapshot = state.store.add_participant(&token, &payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(views::calculation_response(&snapshot)?),
    ))
}

/// Handle requests for removing a participant.
///
/// Refused while the participant still pays for any expense.
pub async fn remove(
    State(state): State<ServerState>,
    Path((token, participant_id)): Path<(String, Uuid)>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<CalculationResponse>, ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let snapshot = state
        .store
        .remove_participant(&token, participant_id)
        .await?;
    views::calculation_response(&snapshot).map(Json)
}
