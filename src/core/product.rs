//! Product business logic - listing and lookup.
//!
//! Products are only created by the importer; this module reads them back, resolving
//! their attribute values through the join table for the listing page.

use crate::{
    entities::{
        AttributeValueMapping, DynamicAttribute, Product, ProductCategory,
        attribute_value_mapping, product,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;
use std::collections::HashMap;

/// A product with everything the listing needs, already resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    /// Product id
    pub id: i64,
    /// Product name
    pub product_name: String,
    /// Category name, if the product has one
    pub category: Option<String>,
    /// (attribute name, value) pairs in mapping order
    pub values: Vec<(String, String)>,
}

impl ProductRow {
    /// First value stored for `attribute`, if any.
    #[must_use]
    pub fn value_for(&self, attribute: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, value)| value.as_str())
    }
}

/// Retrieves every product in insertion order. There is no paging.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the mappings linked to a product, in mapping id order.
///
/// # Errors
/// `ProductNotFound` if no product has this id.
pub async fn get_product_mappings(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<attribute_value_mapping::Model>> {
    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    product
        .find_related(AttributeValueMapping)
        .order_by_asc(attribute_value_mapping::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads every product with its category name and linked attribute values.
pub async fn list_product_rows(db: &DatabaseConnection) -> Result<Vec<ProductRow>> {
    let attribute_names: HashMap<i64, String> = DynamicAttribute::find()
        .all(db)
        .await?
        .into_iter()
        .map(|attribute| (attribute.id, attribute.name))
        .collect();
    let category_names: HashMap<i64, String> = ProductCategory::find()
        .all(db)
        .await?
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect();

    let products = Product::find()
        .order_by_asc(product::Column::Id)
        .find_with_related(AttributeValueMapping)
        .all(db)
        .await?;

    Ok(products
        .into_iter()
        .map(|(product, mut mappings)| {
            mappings.sort_by_key(|mapping| mapping.id);
            ProductRow {
                id: product.id,
                category: product
                    .category_id
                    .and_then(|id| category_names.get(&id).cloned()),
                product_name: product.product_name,
                values: mappings
                    .into_iter()
                    .filter_map(|mapping| {
                        attribute_names
                            .get(&mapping.attribute_id)
                            .map(|name| (name.clone(), mapping.value))
                    })
                    .collect(),
            }
        })
        .collect())
}
