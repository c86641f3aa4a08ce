//! Admin management endpoints.

use api_types::admin::{AdminCreated, AdminNew, AdminsResponse};
use api_types::calculation::CalculationResponse;
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

/// Handle requests for listing a calculation's admins.
pub async fn list(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<AdminsResponse>, ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let admins = state.store.admins(&token).await?;
    Ok(Json(AdminsResponse {
        admins: admins.iter().map(views::admin_view).collect(),
    }))
}

/// Handle requests for granting admin access.
///
/// The response carries the new admin's plaintext token; it is never shown
/// again. On a calculation with no admins this is the claim path: the first
/// caller becomes an admin without presenting a token.
pub async fn create(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
    Json(payload): Json<AdminNew>,
) -> Result<(StatusCode, Json<AdminCreated>), ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let (snapshot, new_admin, admin_token) = state.store.add_admin(&token, &payload.name).await?;
    let summary = views::summary_view(&snapshot.summary()?);
    Ok((
        StatusCode::CREATED,
        Json(AdminCreated {
            calculation: views::calculation_view(&snapshot),
            summary,
            admin_token,
            admin: views::admin_view(&new_admin),
        }),
    ))
}

/// Handle requests for revoking an admin.
///
/// The last admin of a calculation cannot be removed.
pub async fn remove(
    State(state): State<ServerState>,
    Path((token, admin_id)): Path<(String, Uuid)>,
    admin: Option<TypedHeader<AdminTokenHeader>>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<CalculationResponse>, ServerError> {
    let candidate = admin_candidate(admin, query);
    require_edit(&state, &token, candidate.as_deref()).await?;

    let snapshot = state.store.remove_admin(&token, admin_id).await?;
    views::calculation_response(&snapshot).map(Json)
}
