use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{ServerError, admins, calculations, expenses, participants};
use api_types::health::HealthResponse;
use store::{EditAccess, Store};

static ADMIN_TOKEN_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-admin-token");

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
}

/// `TypedHeader` for the admin token.
///
/// Requests that edit a protected calculation carry the plaintext admin
/// token in an "x-admin-token" entry in the header.
#[derive(Debug)]
pub(crate) struct AdminTokenHeader(String);

impl Header for AdminTokenHeader {
    fn name() -> &'static axum::http::HeaderName {
        &ADMIN_TOKEN_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(AdminTokenHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-admin-token header"),
        }
    }
}

/// Query-string fallback for clients that cannot set headers.
#[derive(Debug, Deserialize)]
pub(crate) struct AdminQuery {
    admin: Option<String>,
    #[serde(rename = "adminToken")]
    admin_token: Option<String>,
}

/// The admin token presented by a request. The header wins over the query.
pub(crate) fn admin_candidate(
    header: Option<TypedHeader<AdminTokenHeader>>,
    query: AdminQuery,
) -> Option<String> {
    header
        .map(|TypedHeader(AdminTokenHeader(token))| token)
        .or(query.admin)
        .or(query.admin_token)
}

/// Check edit access on a calculation before a mutating operation.
pub(crate) async fn require_edit(
    state: &ServerState,
    token: &str,
    candidate: Option<&str>,
) -> Result<(), ServerError> {
    match state.store.verify_admin_token(token, candidate).await? {
        EditAccess::Open | EditAccess::Granted => Ok(()),
        EditAccess::MissingToken => Err(ServerError::MissingAdminToken),
        EditAccess::InvalidToken => Err(ServerError::InvalidAdminToken),
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/calculations", post(calculations::create))
        .route(
            "/calculations/{token}",
            get(calculations::detail).patch(calculations::rename),
        )
        .route(
            "/calculations/{token}/participants",
            post(participants::create),
        )
        .route(
            "/calculations/{token}/participants/{id}",
            delete(participants::remove),
        )
        .route("/calculations/{token}/expenses", post(expenses::create))
        .route(
            "/calculations/{token}/expenses/{id}",
            put(expenses::update).delete(expenses::remove),
        )
        .route(
            "/calculations/{token}/admins",
            get(admins::list).post(admins::create),
        )
        .route("/calculations/{token}/admins/{id}", delete(admins::remove))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

pub async fn run(store: Store) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(store, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    store: Store,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        store: Arc::new(store),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    store: Store,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
