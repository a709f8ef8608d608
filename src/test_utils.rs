//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and building sheets and categories with sensible defaults.

use crate::{
    core::{category, sheet::Sheet},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a sheet from string literals.
pub fn sheet_from(columns: &[&str], rows: &[&[&str]]) -> Sheet {
    Sheet::new(
        columns.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    )
}

/// The two-product sheet used throughout the tests:
///
/// | ProductName | Color | Size |
/// |-------------|-------|------|
/// | Shirt       | Red   | M    |
/// | Pants       | Blue  | L    |
pub fn sample_sheet() -> Sheet {
    sheet_from(
        &["ProductName", "Color", "Size"],
        &[&["Shirt", "Red", "M"], &["Pants", "Blue", "L"]],
    )
}

/// CSV text of [`sample_sheet`], for upload tests.
pub const SAMPLE_CSV: &str = "ProductName,Color,Size\nShirt,Red,M\nPants,Blue,L\n";

/// Creates a category with the given name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product_category::Model> {
    category::create_category(db, name.to_string()).await
}
