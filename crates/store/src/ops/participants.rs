use chrono::Utc;
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{CalculationSnapshot, ResultStore, StoreError, expense_shares, expenses, participants};

use super::{
    MAX_NAME_LEN, MAX_PARTICIPANTS, Store, normalize_required_name, required_name_key, with_tx,
};

impl Store {
    /// Add a participant to an existing calculation.
    pub async fn add_participant(
        &self,
        token: &str,
        name: &str,
    ) -> ResultStore<CalculationSnapshot> {
        let name = normalize_required_name(name, "participant", MAX_NAME_LEN)?;
        let key = required_name_key(&name, "participant")?;

        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;

            let count = participants::Entity::find()
                .filter(participants::Column::CalculationId.eq(calculation.id))
                .count(&db_tx)
                .await?;
            if count as usize >= MAX_PARTICIPANTS {
                return Err(StoreError::TooManyParticipants(MAX_PARTICIPANTS));
            }

            let taken = participants::Entity::find()
                .filter(participants::Column::CalculationId.eq(calculation.id))
                .filter(participants::Column::NameNorm.eq(key.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(StoreError::DuplicateName(name.clone()));
            }

            let last = participants::Entity::find()
                .filter(participants::Column::CalculationId.eq(calculation.id))
                .order_by_desc(participants::Column::Position)
                .one(&db_tx)
                .await?;
            let position = last.map_or(0, |p| p.position + 1);

            participants::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                calculation_id: ActiveValue::Set(calculation.id),
                name: ActiveValue::Set(name.clone()),
                name_norm: ActiveValue::Set(key.clone()),
                position: ActiveValue::Set(position),
            }
            .insert(&db_tx)
            .await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }

    /// Remove a participant. Refused while any expense names them as payer.
    ///
    /// The participant disappears from every share list; an expense whose
    /// share list would become empty falls back to being owed by its payer
    /// alone.
    pub async fn remove_participant(
        &self,
        token: &str,
        participant_id: Uuid,
    ) -> ResultStore<CalculationSnapshot> {
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let participant = self
                .require_participant_in_calculation(&db_tx, calculation.id, participant_id)
                .await?;

            let paying = expenses::Entity::find()
                .filter(expenses::Column::CalculationId.eq(calculation.id))
                .filter(expenses::Column::PayerId.eq(participant.id))
                .count(&db_tx)
                .await?;
            if paying > 0 {
                return Err(StoreError::ParticipantIsPayer(paying));
            }

            expense_shares::Entity::delete_many()
                .filter(expense_shares::Column::ParticipantId.eq(participant.id))
                .exec(&db_tx)
                .await?;

            let expense_models = expenses::Entity::find()
                .filter(expenses::Column::CalculationId.eq(calculation.id))
                .all(&db_tx)
                .await?;
            for expense in expense_models {
                let remaining = expense_shares::Entity::find()
                    .filter(expense_shares::Column::ExpenseId.eq(expense.id))
                    .count(&db_tx)
                    .await?;
                if remaining == 0 {
                    expense_shares::ActiveModel {
                        expense_id: ActiveValue::Set(expense.id),
                        participant_id: ActiveValue::Set(expense.payer_id),
                        position: ActiveValue::Set(0),
                    }
                    .insert(&db_tx)
                    .await?;
                }
            }

            participants::Entity::delete_by_id(participant.id)
                .exec(&db_tx)
                .await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }
}
