use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Admin, CalculationSnapshot, Expense, Participant, ResultStore, StoreError, admins,
    calculations, expense_shares, expenses, participants, token,
};

use super::{
    MAX_GROUP_NAME_LEN, MAX_NAME_LEN, MAX_PARTICIPANTS, Store, normalize_required_name,
    required_name_key, with_tx,
};

impl Store {
    /// Create a calculation with its initial participants and first admin.
    ///
    /// Returns the snapshot together with the plaintext admin token. The
    /// token cannot be recovered later; only its hash is stored.
    pub async fn create_calculation(
        &self,
        group_name: &str,
        participant_names: &[String],
        admin_name: Option<&str>,
    ) -> ResultStore<(CalculationSnapshot, String)> {
        let group_name = normalize_required_name(group_name, "group", MAX_GROUP_NAME_LEN)?;
        if participant_names.is_empty() {
            return Err(StoreError::NoParticipants);
        }
        if participant_names.len() > MAX_PARTICIPANTS {
            return Err(StoreError::TooManyParticipants(MAX_PARTICIPANTS));
        }

        let mut names = Vec::with_capacity(participant_names.len());
        let mut seen_keys = HashSet::new();
        for raw in participant_names {
            let name = normalize_required_name(raw, "participant", MAX_NAME_LEN)?;
            let key = required_name_key(&name, "participant")?;
            if !seen_keys.insert(key.clone()) {
                return Err(StoreError::DuplicateName(name));
            }
            names.push((name, key));
        }

        let admin_name =
            normalize_required_name(admin_name.unwrap_or("Admin"), "admin", MAX_NAME_LEN)?;
        let admin_key = required_name_key(&admin_name, "admin")?;

        let now = Utc::now();
        let calculation_id = Uuid::new_v4();
        let share_token = token::new_share_token();
        let admin_token = token::new_admin_token();

        with_tx!(self, |db_tx| {
            let calculation = calculations::ActiveModel {
                id: ActiveValue::Set(calculation_id),
                token: ActiveValue::Set(share_token.clone()),
                group_name: ActiveValue::Set(group_name.clone()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            for (position, (name, key)) in names.iter().enumerate() {
                participants::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    calculation_id: ActiveValue::Set(calculation_id),
                    name: ActiveValue::Set(name.clone()),
                    name_norm: ActiveValue::Set(key.clone()),
                    position: ActiveValue::Set(position as i32),
                }
                .insert(&db_tx)
                .await?;
            }

            admins::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                calculation_id: ActiveValue::Set(calculation_id),
                name: ActiveValue::Set(admin_name.clone()),
                name_norm: ActiveValue::Set(admin_key.clone()),
                token_hash: ActiveValue::Set(token::hash_token(&admin_token)),
                created_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            let snapshot = self.load_snapshot(&db_tx, calculation).await?;
            Ok((snapshot, admin_token))
        })
    }

    /// Load one calculation with everything needed to render it.
    pub async fn calculation_by_token(&self, token: &str) -> ResultStore<CalculationSnapshot> {
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            self.load_snapshot(&db_tx, calculation).await
        })
    }

    /// Rename the group.
    pub async fn rename_calculation(
        &self,
        token: &str,
        group_name: &str,
    ) -> ResultStore<CalculationSnapshot> {
        let group_name = normalize_required_name(group_name, "group", MAX_GROUP_NAME_LEN)?;
        with_tx!(self, |db_tx| {
            let calculation = self.require_calculation_by_token(&db_tx, token).await?;
            let updated = calculations::ActiveModel {
                id: ActiveValue::Set(calculation.id),
                group_name: ActiveValue::Set(group_name.clone()),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            self.load_snapshot(&db_tx, updated).await
        })
    }

    /// Load participants, expenses (with their share lists) and admins.
    ///
    /// Participants and expenses come back in `position` order, shares in
    /// their submitted order; all downstream math relies on this.
    pub(super) async fn load_snapshot(
        &self,
        db: &DatabaseTransaction,
        calculation: calculations::Model,
    ) -> ResultStore<CalculationSnapshot> {
        let participant_models = participants::Entity::find()
            .filter(participants::Column::CalculationId.eq(calculation.id))
            .order_by_asc(participants::Column::Position)
            .all(db)
            .await?;

        let expense_models = expenses::Entity::find()
            .filter(expenses::Column::CalculationId.eq(calculation.id))
            .order_by_asc(expenses::Column::Position)
            .all(db)
            .await?;

        let mut shares_by_expense: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        if !expense_models.is_empty() {
            let expense_ids: Vec<Uuid> = expense_models.iter().map(|e| e.id).collect();
            let share_models = expense_shares::Entity::find()
                .filter(expense_shares::Column::ExpenseId.is_in(expense_ids))
                .order_by_asc(expense_shares::Column::Position)
                .all(db)
                .await?;
            for share in share_models {
                shares_by_expense
                    .entry(share.expense_id)
                    .or_default()
                    .push(share.participant_id);
            }
        }

        let admin_models = admins::Entity::find()
            .filter(admins::Column::CalculationId.eq(calculation.id))
            .order_by_asc(admins::Column::CreatedAt)
            .all(db)
            .await?;

        let expenses = expense_models
            .into_iter()
            .map(|model| {
                let participant_ids = shares_by_expense.remove(&model.id).unwrap_or_default();
                Expense::from_model(model, participant_ids)
            })
            .collect();

        Ok(CalculationSnapshot {
            calculation: calculation.into(),
            participants: participant_models
                .into_iter()
                .map(Participant::from)
                .collect(),
            expenses,
            admins: admin_models.into_iter().map(Admin::from).collect(),
        })
    }
}
