//! Database seeder for Tally development and testing.
//!
//! Seeds a demo user and a few months of income and expense transactions.
//! Running it twice leaves the existing demo user alone.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, Utc};
use sea_orm_migration::MigratorTrait;
use tally_core::{
    auth::{UserRole, hash_password},
    ledger::{NewTransaction, TransactionType},
};
use tally_db::{TransactionRepository, UserRepository, migration::Migrator};

const DEMO_EMAIL: &str = "demo@tally.dev";
const DEMO_PASSWORD: &str = "password123";
const ADMIN_EMAIL: &str = "admin@tally.dev";

/// `(type, category, amount, note, days before today)`
const DEMO_TRANSACTIONS: &[(TransactionType, &str, i64, Option<&str>, i64)] = &[
    (TransactionType::Income, "Salary", 5_000_000, Some("Monthly salary"), 1),
    (TransactionType::Expense, "Food", 45_000, Some("Lunch with team"), 2),
    (TransactionType::Expense, "Transport", 20_000, None, 3),
    (TransactionType::Expense, "Bills", 350_000, Some("Electricity"), 10),
    (TransactionType::Income, "Freelance", 1_200_000, Some("Website project"), 24),
    (TransactionType::Expense, "Food", 60_000, None, 33),
    (TransactionType::Income, "Salary", 5_000_000, Some("Monthly salary"), 31),
    (TransactionType::Expense, "Shopping", 275_000, Some("Shoes"), 40),
    (TransactionType::Income, "Salary", 5_000_000, Some("Monthly salary"), 62),
    (TransactionType::Expense, "Health", 150_000, Some("Pharmacy"), 70),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = tally_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None).await?;

    let users = UserRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);

    println!("Seeding admin user...");
    if users.email_exists(ADMIN_EMAIL).await? {
        println!("  Admin user already exists, skipping...");
    } else {
        users
            .create("Admin", ADMIN_EMAIL, &hash_password(DEMO_PASSWORD)?, UserRole::Admin)
            .await?;
    }

    println!("Seeding demo user...");
    if users.email_exists(DEMO_EMAIL).await? {
        println!("  Demo user already exists, skipping...");
        return Ok(());
    }
    let demo = users
        .create("Demo User", DEMO_EMAIL, &hash_password(DEMO_PASSWORD)?, UserRole::User)
        .await?;

    println!("Seeding transactions...");
    let today = Utc::now().date_naive();
    for &(transaction_type, category, amount, note, days_ago) in DEMO_TRANSACTIONS {
        let input = NewTransaction {
            transaction_type,
            category: category.to_string(),
            amount,
            note: note.map(String::from),
            date: today - Duration::days(days_ago),
        }
        .validated()?;
        transactions.create(demo.id, input).await?;
    }

    println!("Seeding complete! Log in as {DEMO_EMAIL} / {DEMO_PASSWORD}");

    Ok(())
}
