//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated with `Schema::create_table_from_entity`, so the unique index on
//! attribute names and the cascading foreign keys come straight from the entity
//! definitions rather than from hand-written SQL.

use crate::entities::{
    AttributeValueMapping, DynamicAttribute, Product, ProductAttributeMapping, ProductCategory,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;

/// Connects to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first so that
/// `?mode=rwc` can create the database file on first start.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    tracing::debug!("Connecting to {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables, in foreign-key dependency order, skipping ones that already exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, ProductCategory).await?;
    create_table(db, DynamicAttribute).await?;
    create_table(db, AttributeValueMapping).await?;
    create_table(db, Product).await?;
    create_table(db, ProductAttributeMapping).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(Path::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        AttributeValueMappingModel, DynamicAttributeModel, ProductAttributeMappingModel,
        ProductCategoryModel, ProductModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProductCategoryModel> = ProductCategory::find().limit(1).all(&db).await?;
        let _: Vec<DynamicAttributeModel> = DynamicAttribute::find().limit(1).all(&db).await?;
        let _: Vec<AttributeValueMappingModel> =
            AttributeValueMapping::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<ProductAttributeMappingModel> =
            ProductAttributeMapping::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite://data/app.sqlite?mode=rwc"),
            Some(Path::new("data/app.sqlite"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }
}
