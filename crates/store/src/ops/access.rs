use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{ResultStore, StoreError, admins, calculations, expenses, participants};

use super::Store;

/// Generates a `require_*_in_calculation` lookup for a child entity.
macro_rules! impl_require_in_calculation {
    ($require_fn:ident, $entity:path, $calculation_col:expr, $model:ty, $err:expr) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            calculation_id: Uuid,
            target_id: Uuid,
        ) -> ResultStore<$model> {
            <$entity>::find_by_id(target_id)
                .filter($calculation_col.eq(calculation_id))
                .one(db)
                .await?
                .ok_or($err)
        }
    };
}

impl Store {
    impl_require_in_calculation!(
        require_participant_in_calculation,
        participants::Entity,
        participants::Column::CalculationId,
        participants::Model,
        StoreError::ParticipantNotFound
    );

    impl_require_in_calculation!(
        require_expense_in_calculation,
        expenses::Entity,
        expenses::Column::CalculationId,
        expenses::Model,
        StoreError::ExpenseNotFound
    );

    impl_require_in_calculation!(
        require_admin_in_calculation,
        admins::Entity,
        admins::Column::CalculationId,
        admins::Model,
        StoreError::AdminNotFound
    );

    pub(super) async fn require_calculation_by_token(
        &self,
        db: &DatabaseTransaction,
        token: &str,
    ) -> ResultStore<calculations::Model> {
        calculations::Entity::find()
            .filter(calculations::Column::Token.eq(token))
            .one(db)
            .await?
            .ok_or(StoreError::CalculationNotFound)
    }

    /// Bump `updated_at` after any mutation of the calculation's content.
    pub(super) async fn touch_calculation(
        &self,
        db: &DatabaseTransaction,
        calculation_id: Uuid,
        at: DateTime<Utc>,
    ) -> ResultStore<calculations::Model> {
        let model = calculations::ActiveModel {
            id: ActiveValue::Set(calculation_id),
            updated_at: ActiveValue::Set(at),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(model)
    }
}
