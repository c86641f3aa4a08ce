//! Expense rows. Who shared an expense lives in `expense_shares`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub calculation_id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub payer_id: Uuid,
    pub position: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::calculations::Entity",
        from = "Column::CalculationId",
        to = "super::calculations::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Calculations,
    #[sea_orm(
        belongs_to = "super::participants::Entity",
        from = "Column::PayerId",
        to = "super::participants::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Payer,
    #[sea_orm(has_many = "super::expense_shares::Entity")]
    ExpenseShares,
}

impl Related<super::calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Calculations.def()
    }
}

impl Related<super::expense_shares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseShares.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One logged expense together with its ordered share list.
///
/// `participant_ids` keeps the submitted order; when the amount does not
/// divide evenly the leading ids absorb the leftover cents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub payer_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub(crate) fn from_model(model: Model, participant_ids: Vec<Uuid>) -> Self {
        Self {
            id: model.id,
            description: model.description,
            amount_cents: model.amount_cents,
            payer_id: model.payer_id,
            participant_ids,
            created_at: model.created_at,
        }
    }
}
