use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod calculation {
    use super::*;

    /// Request body for creating a calculation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CalculationNew {
        pub group_name: String,
        /// Participant display names; normalized and deduplicated server-side.
        pub participants: Vec<String>,
        /// Name for the first admin. Defaults to "Admin" when absent.
        pub admin_name: Option<String>,
    }

    /// Request body for partially updating a calculation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CalculationUpdate {
        pub group_name: Option<String>,
    }

    /// The full calculation document as exposed to clients.
    ///
    /// Admin token hashes are never part of this view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CalculationView {
        /// Share token addressing this calculation in URLs.
        pub token: String,
        pub group_name: String,
        pub participants: Vec<participant::ParticipantView>,
        pub expenses: Vec<expense::ExpenseView>,
        pub admins: Vec<admin::AdminView>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Response envelope for mutations: the updated document plus the
    /// recomputed summary.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CalculationResponse {
        pub calculation: CalculationView,
        pub summary: summary::SummaryView,
    }

    /// Response for fetching a calculation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CalculationDetail {
        pub calculation: CalculationView,
        pub summary: summary::SummaryView,
        /// Whether the presented admin token (if any) grants edit access.
        pub can_edit: bool,
    }

    /// Response for creating a calculation.
    ///
    /// `admin_token` is shown here and never again; only its hash is stored.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CalculationCreated {
        pub token: String,
        pub admin_token: String,
        pub can_edit: bool,
        pub calculation: CalculationView,
        pub summary: summary::SummaryView,
    }
}

pub mod participant {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantView {
        pub id: Uuid,
        pub name: String,
    }
}

pub mod expense {
    use super::*;

    /// Request body for creating or replacing an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpsert {
        /// Defaults to "" when absent.
        pub description: Option<String>,
        /// Integer cents, must be > 0.
        pub amount_cents: i64,
        pub payer_id: Uuid,
        /// Who shares the cost; at least one id, in an order that matters
        /// for remainder cents.
        pub participant_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub description: String,
        pub amount_cents: i64,
        pub payer_id: Uuid,
        pub participant_ids: Vec<Uuid>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod admin {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminView {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }

    /// Response body for listing admins.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminsResponse {
        pub admins: Vec<AdminView>,
    }

    /// Response for creating an admin.
    ///
    /// `admin_token` is shown here and never again; only its hash is stored.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminCreated {
        pub calculation: calculation::CalculationView,
        pub summary: summary::SummaryView,
        pub admin_token: String,
        pub admin: AdminView,
    }
}

pub mod summary {
    use super::*;

    /// Net position of one participant, in input participant order.
    ///
    /// Ids are plain strings here: the summary mirrors the storage-agnostic
    /// engine output.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub participant_id: String,
        pub name: String,
        /// Positive = should receive, negative = should pay.
        pub balance_cents: i64,
    }

    /// A recommended settling payment.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferView {
        pub from_id: String,
        pub from_name: String,
        pub to_id: String,
        pub to_name: String,
        pub amount_cents: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryView {
        /// Raw sum over all expenses, independent of who covers them.
        pub total_expenses_cents: i64,
        pub balances: Vec<BalanceView>,
        pub transfers: Vec<TransferView>,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HealthResponse {
        pub ok: bool,
        /// Server time, ISO-8601 UTC.
        pub ts: String,
    }
}
