//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Quota:
//!
//! - `calculations`: one shared split, addressed by its share token
//! - `participants`: people taking part in a calculation
//! - `expenses`: itemized costs paid by one participant
//! - `expense_shares`: who shares each expense, in submitted order
//! - `admins`: holders of edit access (hashed admin tokens)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Calculations {
    Table,
    Id,
    Token,
    GroupName,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Participants {
    Table,
    Id,
    CalculationId,
    Name,
    NameNorm,
    Position,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    CalculationId,
    Description,
    AmountCents,
    PayerId,
    Position,
    CreatedAt,
}

#[derive(Iden)]
enum ExpenseShares {
    Table,
    ExpenseId,
    ParticipantId,
    Position,
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
    CalculationId,
    Name,
    NameNorm,
    TokenHash,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Calculations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Calculations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calculations::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Calculations::Token).string().not_null())
                    .col(ColumnDef::new(Calculations::GroupName).string().not_null())
                    .col(
                        ColumnDef::new(Calculations::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Calculations::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-calculations-token-unique")
                    .table(Calculations::Table)
                    .col(Calculations::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Participants
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::CalculationId)
                            .blob()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::Name).string().not_null())
                    .col(ColumnDef::new(Participants::NameNorm).string().not_null())
                    .col(
                        ColumnDef::new(Participants::Position)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-participants-calculation_id")
                            .from(Participants::Table, Participants::CalculationId)
                            .to(Calculations::Table, Calculations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-participants-calculation_id-name_norm-unique")
                    .table(Participants::Table)
                    .col(Participants::CalculationId)
                    .col(Participants::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-participants-calculation_id-position")
                    .table(Participants::Table)
                    .col(Participants::CalculationId)
                    .col(Participants::Position)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::CalculationId).blob().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::PayerId).blob().not_null())
                    .col(ColumnDef::new(Expenses::Position).integer().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-calculation_id")
                            .from(Expenses::Table, Expenses::CalculationId)
                            .to(Calculations::Table, Calculations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-payer_id")
                            .from(Expenses::Table, Expenses::PayerId)
                            .to(Participants::Table, Participants::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-calculation_id-position")
                    .table(Expenses::Table)
                    .col(Expenses::CalculationId)
                    .col(Expenses::Position)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Expense shares
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ExpenseShares::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExpenseShares::ExpenseId).blob().not_null())
                    .col(
                        ColumnDef::new(ExpenseShares::ParticipantId)
                            .blob()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseShares::Position)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ExpenseShares::ExpenseId)
                            .col(ExpenseShares::ParticipantId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_shares-expense_id")
                            .from(ExpenseShares::Table, ExpenseShares::ExpenseId)
                            .to(Expenses::Table, Expenses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_shares-participant_id")
                            .from(ExpenseShares::Table, ExpenseShares::ParticipantId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense_shares-expense_id-position")
                    .table(ExpenseShares::Table)
                    .col(ExpenseShares::ExpenseId)
                    .col(ExpenseShares::Position)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Admins
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).blob().not_null().primary_key())
                    .col(ColumnDef::new(Admins::CalculationId).blob().not_null())
                    .col(ColumnDef::new(Admins::Name).string().not_null())
                    .col(ColumnDef::new(Admins::NameNorm).string().not_null())
                    .col(ColumnDef::new(Admins::TokenHash).string().not_null())
                    .col(ColumnDef::new(Admins::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-admins-calculation_id")
                            .from(Admins::Table, Admins::CalculationId)
                            .to(Calculations::Table, Calculations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-admins-calculation_id-name_norm-unique")
                    .table(Admins::Table)
                    .col(Admins::CalculationId)
                    .col(Admins::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseShares::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Participants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Calculations::Table).to_owned())
            .await?;
        Ok(())
    }
}
