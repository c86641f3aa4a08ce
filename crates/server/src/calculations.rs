//! Calculation API endpoints.

use api_types::calculation::{
    CalculationCreated, CalculationDetail, CalculationNew, CalculationResponse, CalculationUpdate,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;

use crate::{
    ServerError,
    server::{AdminQuery, AdminTokenHeader, ServerState, admin_candidate, require_edit},
    views,
};

/// Handle requests for creating a new calculation.
///
/// The response carries the plaintext admin token; it is never shown again.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CalculationNew>,
) -> Result<(StatusCode, Json<CalculationCreated>), ServerError> {
    let (snapshot, admin_token) = state
        .store
        .create_calculation(
            &payload.group_name,
            &payload.participants,
            payload.admin_name.as_deref(),
        )
        .await?;

    let summary = views::summary_view(&snapshot.summary()?);
    Ok((
        StatusCode::CREATED,
        Json(CalculationCreated {
            token: snapshot.calculation.token.clone(),
            admin_token,
            can_edit: true,
            calculation: views::calculation_view(&snapshot),
            summary,
        }),
    ))
}

/// Handle requests for fetching a calculation by its share token.
pub async fn detail(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<CalculationDetail>, ServerError> {
    let candidate = admin_candidate(admin, query);
    let snapshot = state.store.calculation_by_token(&token).await?;
    let access = state
        .store
        .verify_admin_token(&token, candidate.as_deref())
        .await?;

    Ok(Json(CalculationDetail {
        calculation: views::calculation_view(&snapshot),
        summary: views::summary_view(&snapshot.summary()?),
        can_edit: access.can_edit(),
    }))
}

/// Handle requests for renaming a calculation.
pub async fn rename(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
    Json(payload): Json<CalculationUpdate>,
) -> Result<Json<CalculationResponse>, ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let group_name = payload
        .group_name
        .ok_or_else(|| ServerError::Generic("group_name required".to_string()))?;
    let snapshot = state.store.rename_calculation(&token, &group_name).await?;
    views::calculation_response(&snapshot).map(Json)
}
