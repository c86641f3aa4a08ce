//! Admin rows. Only the SHA-256 hash of an admin token is stored; the
//! plaintext token is returned exactly once, when the admin is created.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub calculation_id: Uuid,
    pub name: String,
    pub name_norm: String,
    pub token_hash: String,
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
}

impl Related<super::calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Calculations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An edit-access holder. Token hashes never leave the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for Admin {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
