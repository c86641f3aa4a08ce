use std::collections::HashMap;
use std::error::Error;

use clap::{Args, Parser, Subcommand};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::MoneyCents;
use store::{CalculationSnapshot, ExpenseInput, Store};

#[derive(Parser, Debug)]
#[command(name = "quota_admin")]
#[command(about = "Admin utilities for Quota (bootstrap and inspect calculations)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./quota.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Calculation(Calculation),
    Admin(Admin),
    Expense(Expense),
}

#[derive(Args, Debug)]
struct Calculation {
    #[command(subcommand)]
    command: CalculationCommand,
}

#[derive(Subcommand, Debug)]
enum CalculationCommand {
    Create(CalculationCreateArgs),
    Show(CalculationShowArgs),
}

#[derive(Args, Debug)]
struct CalculationCreateArgs {
    #[arg(long)]
    group_name: String,
    /// Repeat once per participant, in display order.
    #[arg(long = "participant")]
    participants: Vec<String>,
    /// Name for the first admin. Defaults to "Admin".
    #[arg(long)]
    admin_name: Option<String>,
}

#[derive(Args, Debug)]
struct CalculationShowArgs {
    #[arg(long)]
    token: String,
}

#[derive(Args, Debug)]
struct Admin {
    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    Grant(AdminGrantArgs),
}

#[derive(Args, Debug)]
struct AdminGrantArgs {
    #[arg(long)]
    token: String,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    Add(ExpenseAddArgs),
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    #[arg(long)]
    token: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Decimal amount, e.g. "12.30".
    #[arg(long)]
    amount: String,
    /// Name of the participant who paid.
    #[arg(long)]
    payer: String,
    /// Repeat once per sharing participant. Defaults to the payer alone.
    #[arg(long = "share")]
    shares: Vec<String>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn participant_id_by_name(snapshot: &CalculationSnapshot, name: &str) -> Option<Uuid> {
    snapshot
        .participants
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
}

fn print_snapshot(snapshot: &CalculationSnapshot) -> Result<(), Box<dyn Error + Send + Sync>> {
    println!(
        "{} ({})",
        snapshot.calculation.group_name, snapshot.calculation.token
    );

    println!("participants:");
    for participant in &snapshot.participants {
        println!("  {}", participant.name);
    }

    if !snapshot.expenses.is_empty() {
        let names: HashMap<Uuid, &str> = snapshot
            .participants
            .iter()
            .map(|p| (p.id, p.name.as_str()))
            .collect();
        println!("expenses:");
        for expense in &snapshot.expenses {
            let payer = names.get(&expense.payer_id).copied().unwrap_or("?");
            let description = if expense.description.is_empty() {
                "(no description)"
            } else {
                expense.description.as_str()
            };
            println!(
                "  {} {} paid by {}",
                MoneyCents::new(expense.amount_cents),
                description,
                payer
            );
        }
    }

    let summary = snapshot.summary()?;
    println!("total: {}", summary.total_expenses_cents);
    println!("balances:");
    for balance in &summary.balances {
        println!("  {}: {}", balance.name, balance.balance_cents);
    }
    if !summary.transfers.is_empty() {
        println!("transfers:");
        for transfer in &summary.transfers {
            println!(
                "  {} -> {}: {}",
                transfer.from_name, transfer.to_name, transfer.amount_cents
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let store = Store::builder().database(db).build().await?;

    match cli.command {
        Command::Calculation(Calculation {
            command: CalculationCommand::Create(args),
        }) => {
            let (snapshot, admin_token) = store
                .create_calculation(
                    &args.group_name,
                    &args.participants,
                    args.admin_name.as_deref(),
                )
                .await?;

            println!("created calculation: {}", snapshot.calculation.group_name);
            println!("share token: {}", snapshot.calculation.token);
            println!("admin token: {admin_token}");
        }
        Command::Calculation(Calculation {
            command: CalculationCommand::Show(args),
        }) => {
            let snapshot = store.calculation_by_token(&args.token).await?;
            print_snapshot(&snapshot)?;
        }
        Command::Admin(Admin {
            command: AdminCommand::Grant(args),
        }) => {
            let (_, admin, admin_token) = store.add_admin(&args.token, &args.name).await?;

            println!("granted admin access to: {}", admin.name);
            println!("admin token: {admin_token}");
        }
        Command::Expense(Expense {
            command: ExpenseCommand::Add(args),
        }) => {
            let amount: MoneyCents = match args.amount.parse() {
                Ok(amount) => amount,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };

            let snapshot = store.calculation_by_token(&args.token).await?;
            let Some(payer_id) = participant_id_by_name(&snapshot, &args.payer) else {
                eprintln!("participant not found: {}", args.payer);
                std::process::exit(1);
            };
            let mut participant_ids = Vec::with_capacity(args.shares.len());
            for share in &args.shares {
                let Some(id) = participant_id_by_name(&snapshot, share) else {
                    eprintln!("participant not found: {share}");
                    std::process::exit(1);
                };
                participant_ids.push(id);
            }
            if participant_ids.is_empty() {
                participant_ids.push(payer_id);
            }

            let snapshot = store
                .add_expense(
                    &args.token,
                    ExpenseInput {
                        description: Some(args.description),
                        amount_cents: amount.cents(),
                        payer_id,
                        participant_ids,
                    },
                )
                .await?;

            println!("logged expense on: {}", snapshot.calculation.group_name);
        }
    }

    Ok(())
}
