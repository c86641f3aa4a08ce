use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use store::StoreError;

pub use server::{run, run_with_listener, spawn_with_listener};

mod admins;
mod calculations;
mod expenses;
mod participants;
mod server;
mod views;

pub mod types {
    pub mod calculation {
        pub use api_types::calculation::{
            CalculationCreated, CalculationDetail, CalculationNew, CalculationResponse,
            CalculationUpdate, CalculationView,
        };
    }

    pub mod participant {
        pub use api_types::participant::{ParticipantNew, ParticipantView};
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseUpsert, ExpenseView};
    }

    pub mod admin {
        pub use api_types::admin::{AdminCreated, AdminNew, AdminView, AdminsResponse};
    }

    pub mod summary {
        pub use api_types::summary::{BalanceView, SummaryView, TransferView};
    }

    pub mod health {
        pub use api_types::health::HealthResponse;
    }
}

pub enum ServerError {
    Store(StoreError),
    MissingAdminToken,
    InvalidAdminToken,
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::CalculationNotFound
        | StoreError::ParticipantNotFound
        | StoreError::ExpenseNotFound
        | StoreError::AdminNotFound => StatusCode::NOT_FOUND,
        StoreError::DuplicateName(_)
        | StoreError::UnknownParticipant(_)
        | StoreError::ParticipantIsPayer(_)
        | StoreError::LastAdmin => StatusCode::CONFLICT,
        StoreError::TooManyParticipants(_)
        | StoreError::NoParticipants
        | StoreError::InvalidName(_)
        | StoreError::InvalidAmount(_)
        | StoreError::EmptyShares => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_store_error(err: StoreError) -> String {
    match err {
        StoreError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Store(err) => (status_for_store_error(&err), message_for_store_error(err)),
            ServerError::MissingAdminToken => {
                (StatusCode::FORBIDDEN, "Admin token required".to_string())
            }
            ServerError::InvalidAdminToken => {
                (StatusCode::FORBIDDEN, "Invalid admin token".to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
