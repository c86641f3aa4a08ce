//! Calculation rows and the loaded snapshot handed out to callers.
//!
//! A calculation is one shared split: a group name, its participants, the
//! expenses they logged and the admins holding edit access. It is addressed
//! by an unguessable share token rather than a numeric id.

use chrono::{DateTime, Utc};
use engine::Summary;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::{Admin, Expense, Participant, ResultStore};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "calculations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub token: String,
    pub group_name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::participants::Entity")]
    Participants,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::admins::Entity")]
    Admins,
}

impl Related<super::participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A stored calculation, without its participants and expenses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calculation {
    pub id: Uuid,
    pub token: String,
    pub group_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Calculation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            token: model.token,
            group_name: model.group_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Full state of one calculation as loaded from the database.
///
/// Participants and expenses keep their stored order (insertion order),
/// which drives remainder assignment and transfer tie-breaking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationSnapshot {
    pub calculation: Calculation,
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
    pub admins: Vec<Admin>,
}

impl CalculationSnapshot {
    /// Compute balances and settlement transfers for the snapshot.
    pub fn summary(&self) -> ResultStore<Summary> {
        let participants: Vec<engine::Participant> = self
            .participants
            .iter()
            .map(|p| engine::Participant::new(p.id.to_string(), p.name.clone()))
            .collect();
        let expenses: Vec<engine::Expense> = self
            .expenses
            .iter()
            .map(|e| engine::Expense {
                id: e.id.to_string(),
                description: e.description.clone(),
                amount_cents: engine::MoneyCents::new(e.amount_cents),
                payer_id: e.payer_id.to_string(),
                participant_ids: e.participant_ids.iter().map(Uuid::to_string).collect(),
            })
            .collect();
        Ok(engine::compute_summary(&participants, &expenses)?)
    }

    /// Whether the calculation still accepts every request without an admin
    /// token (no admin was ever created).
    pub fn is_open(&self) -> bool {
        self.admins.is_empty()
    }
}
