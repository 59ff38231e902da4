//! Database configuration module.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust struct definitions without
//! hand-written SQL.

use crate::entities::{Expense, Session, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default `SQLite` location when no `DATABASE_URL` is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/family_budget.sqlite?mode=rwc";

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions, ignoring ones that already
/// exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut session_table = schema.create_table_from_entity(Session);

    db.execute(builder.build(user_table.if_not_exists())).await?;
    db.execute(builder.build(expense_table.if_not_exists()))
        .await?;
    db.execute(builder.build(session_table.if_not_exists()))
        .await?;

    Ok(())
}

/// Connects to the configured database and ensures the schema exists.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}
