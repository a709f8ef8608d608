//! Category business logic - administrative grouping of products.
//!
//! Categories never come from a spreadsheet. They are created and assigned here and
//! deleting one removes its products through the foreign key cascade.

use crate::{
    entities::{Product, ProductCategory, product, product_category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Longest accepted category name, in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 20;

/// Creates a category after trimming and validating its name.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The name is longer than [`MAX_CATEGORY_NAME_LEN`] characters
/// - The database insert operation fails
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
) -> Result<product_category::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(Error::Validation {
            message: format!("Category name cannot exceed {MAX_CATEGORY_NAME_LEN} characters"),
        });
    }

    product_category::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all categories ordered alphabetically by name.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<product_category::Model>> {
    ProductCategory::find()
        .order_by_asc(product_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<product_category::Model>> {
    ProductCategory::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sets (or with `None`, clears) a product's category.
///
/// # Errors
/// `ProductNotFound` or `CategoryNotFound` when either id does not exist.
pub async fn assign_category(
    db: &DatabaseConnection,
    product_id: i64,
    category_id: Option<i64>,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    if let Some(id) = category_id {
        get_category_by_id(db, id)
            .await?
            .ok_or(Error::CategoryNotFound { id })?;
    }

    product.category_id = Set(category_id);
    product.update(db).await.map_err(Into::into)
}

/// Deletes a category together with every product assigned to it.
///
/// # Errors
/// `CategoryNotFound` when the id does not exist.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let result = ProductCategory::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CategoryNotFound { id: category_id });
    }
    tracing::info!("Deleted category {category_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{importer::import_sheet, product as product_core},
        test_utils::*,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, String::new()).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_category(&db, "   ".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_category(&db, "x".repeat(MAX_CATEGORY_NAME_LEN + 1)).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_categories() -> Result<()> {
        let db = setup_test_db().await?;

        let toys = create_category(&db, "  Toys ".to_string()).await?;
        assert_eq!(toys.name, "Toys");
        create_test_category(&db, "Clothing").await?;

        let names: Vec<String> = list_categories(&db)
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, ["Clothing", "Toys"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_and_clear_category() -> Result<()> {
        let db = setup_test_db().await?;
        import_sheet(&db, &sample_sheet()).await?;
        let clothing = create_test_category(&db, "Clothing").await?;
        let shirt = product_core::list_products(&db).await?.remove(0);

        let updated = assign_category(&db, shirt.id, Some(clothing.id)).await?;
        assert_eq!(updated.category_id, Some(clothing.id));

        let cleared = assign_category(&db, shirt.id, None).await?;
        assert_eq!(cleared.category_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_category_missing_ids() -> Result<()> {
        let db = setup_test_db().await?;
        import_sheet(&db, &sample_sheet()).await?;
        let shirt = product_core::list_products(&db).await?.remove(0);

        let result = assign_category(&db, shirt.id, Some(42)).await;
        assert!(matches!(result, Err(Error::CategoryNotFound { id: 42 })));

        let result = assign_category(&db, 999, None).await;
        assert!(matches!(result, Err(Error::ProductNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_cascades_to_products() -> Result<()> {
        let db = setup_test_db().await?;
        import_sheet(&db, &sample_sheet()).await?;
        let clothing = create_test_category(&db, "Clothing").await?;
        let shirt = product_core::list_products(&db).await?.remove(0);
        assign_category(&db, shirt.id, Some(clothing.id)).await?;

        delete_category(&db, clothing.id).await?;

        let remaining = product_core::list_products(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_name, "Pants");
        assert!(get_category_by_id(&db, clothing.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_category(&db, 999).await;
        assert!(matches!(result, Err(Error::CategoryNotFound { id: 999 })));
        Ok(())
    }
}
