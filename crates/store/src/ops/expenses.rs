use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{CalculationSnapshot, ResultStore, StoreError, expense_shares, expenses, participants};

use super::{MAX_AMOUNT_CENTS, Store, normalize_description, with_tx};

/// New values for an expense, shared by create and update.
#[derive(Clone, Debug)]
pub struct ExpenseInput {
    pub description: Option<String>,
    pub amount_cents: i64,
    pub payer_id: Uuid,
    pub participant_ids: Vec<Uuid>,
}

fn validate_amount(amount_cents: i64) -> ResultStore<()> {
    if amount_cents <= 0 {
        return Err(StoreError::InvalidAmount(
            "amount_cents must be > 0".to_string(),
        ));
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(StoreError::InvalidAmount(format!(
            "amount_cents must be at most {MAX_AMOUNT_CENTS}"
        )));
    }
    Ok(())
}

impl Store {
    /// Log a new expense on a calculation.
    pub async fn add_expense(
        &self,
        token: &str,
        input: ExpenseInput,
    ) -> ResultStore<CalculationSnapshot> {
        let description = normalize_description(input.description.as_deref())?;
        validate_amount(input.amount_cents)?;

        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let share_ids = self
                .resolve_share_ids(&db_tx, calculation.id, input.payer_id, &input.participant_ids)
                .await?;

            let last = expenses::Entity::find()
                .filter(expenses::Column::CalculationId.eq(calculation.id))
                .order_by_desc(expenses::Column::Position)
                .one(&db_tx)
                .await?;
            let position = last.map_or(0, |e| e.position + 1);

            let expense_id = Uuid::new_v4();
            expenses::ActiveModel {
                id: ActiveValue::Set(expense_id),
                calculation_id: ActiveValue::Set(calculation.id),
                description: ActiveValue::Set(description.clone()),
                amount_cents: ActiveValue::Set(input.amount_cents),
                payer_id: ActiveValue::Set(input.payer_id),
                position: ActiveValue::Set(position),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            self.insert_shares(&db_tx, expense_id, &share_ids).await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }

    /// Replace an expense's description, amount, payer and share list.
    ///
    /// Keeps the expense's position and creation time.
    pub async fn update_expense(
        &self,
        token: &str,
        expense_id: Uuid,
        input: ExpenseInput,
    ) -> ResultStore<CalculationSnapshot> {
        let description = normalize_description(input.description.as_deref())?;
        validate_amount(input.amount_cents)?;

        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let expense = self
                .require_expense_in_calculation(&db_tx, calculation.id, expense_id)
                .await?;
            let share_ids = self
                .resolve_share_ids(&db_tx, calculation.id, input.payer_id, &input.participant_ids)
                .await?;

            expenses::ActiveModel {
                id: ActiveValue::Set(expense.id),
                description: ActiveValue::Set(description.clone()),
                amount_cents: ActiveValue::Set(input.amount_cents),
                payer_id: ActiveValue::Set(input.payer_id),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            expense_shares::Entity::delete_many()
                .filter(expense_shares::Column::ExpenseId.eq(expense.id))
                .exec(&db_tx)
                .await?;
            self.insert_shares(&db_tx, expense.id, &share_ids).await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }

    /// Delete an expense and its share list.
    pub async fn remove_expense(
        &self,
        token: &str,
        expense_id: Uuid,
    ) -> ResultStore<CalculationSnapshot> {
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let expense = self
                .require_expense_in_calculation(&db_tx, calculation.id, expense_id)
                .await?;

            expense_shares::Entity::delete_many()
                .filter(expense_shares::Column::ExpenseId.eq(expense.id))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_by_id(expense.id)
                .exec(&db_tx)
                .await?;

            let calculation = self
                .touch_calculation(&db_tx, calculation.id, Utc::now())
                .await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }

    /// Check the payer and every share id against the calculation's
    /// participants; dedupe while keeping the submitted order. An empty list
    /// is refused.
    async fn resolve_share_ids(
        &self,
        db: &DatabaseTransaction,
        calculation_id: Uuid,
        payer_id: Uuid,
        participant_ids: &[Uuid],
    ) -> ResultStore<Vec<Uuid>> {
        let known: HashSet<Uuid> = participants::Entity::find()
            .filter(participants::Column::CalculationId.eq(calculation_id))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if !known.contains(&payer_id) {
            return Err(StoreError::UnknownParticipant(payer_id));
        }

        let mut share_ids = Vec::with_capacity(participant_ids.len());
        let mut seen = HashSet::new();
        for id in participant_ids {
            if !known.contains(id) {
                return Err(StoreError::UnknownParticipant(*id));
            }
            if seen.insert(*id) {
                share_ids.push(*id);
            }
        }
        if share_ids.is_empty() {
            return Err(StoreError::EmptyShares);
        }
        Ok(share_ids)
    }

    async fn insert_shares(
        &self,
        db: &DatabaseTransaction,
        expense_id: Uuid,
        share_ids: &[Uuid],
    ) -> ResultStore<()> {
        for (position, participant_id) in share_ids.iter().enumerate() {
            expense_shares::ActiveModel {
                expense_id: ActiveValue::Set(expense_id),
                participant_id: ActiveValue::Set(*participant_id),
                position: ActiveValue::Set(position as i32),
            }
            .insert(db)
            .await?;
        }
        Ok(())
    }
}
