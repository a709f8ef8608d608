//! Spreadsheet import - turns a [`Sheet`] into attributes, mappings, and products.
//!
//! The whole import runs in one database transaction. The steps are:
//!
//! 1. every column header becomes a [`dynamic_attribute`] row (existing names are kept);
//! 2. every non-missing cell becomes an [`attribute_value_mapping`] row;
//! 3. every row with a non-missing first cell becomes a [`product`];
//! 4. every other non-missing cell of that row gets a *fresh* mapping row linked to the
//!    product through the join table.
//!
//! Step 4 does not reuse the rows from step 2, so each linked cell ends up stored twice.
//! The product listing only follows the join table, so the unlinked copies are inert.

use crate::{
    core::sheet::{Sheet, is_missing},
    entities::{
        AttributeValueMapping, DynamicAttribute, ProductAttributeMapping, attribute_value_mapping,
        dynamic_attribute, product, product_attribute_mapping,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, PaginatorTrait, Set, TransactionTrait, prelude::*, sea_query::OnConflict,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

// Two bind parameters per mapping row; keeps each INSERT well under SQLite's limit.
const MAPPING_CHUNK: usize = 500;

/// Row counts written by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Attributes that did not exist before this import
    pub attributes_created: u64,
    /// Mapping rows inserted, both the per-cell batch and the per-product links
    pub mappings_created: u64,
    /// Products inserted
    pub products_created: u64,
}

/// Imports `sheet` atomically: either every row is written or none is.
///
/// The first column is the product name. Cells equal to the missing-value marker are
/// skipped; a missing product name skips the product but not the step-2 mappings of
/// the rest of its row.
///
/// # Errors
/// Any database failure aborts and rolls back the whole import.
pub async fn import_sheet(db: &DatabaseConnection, sheet: &Sheet) -> Result<ImportSummary> {
    let txn = db.begin().await?;

    let attributes_before = DynamicAttribute::find().count(&txn).await?;
    ensure_attributes(&txn, sheet.columns()).await?;
    let attribute_ids = attribute_ids_by_name(&txn, sheet.columns()).await?;
    let attributes_created = DynamicAttribute::find().count(&txn).await? - attributes_before;

    let mut mappings_created = insert_cell_mappings(&txn, sheet, &attribute_ids).await?;

    let mut products_created = 0;
    for row in sheet.rows() {
        let Some(product_name) = row.first().filter(|name| !is_missing(name)) else {
            continue;
        };

        let product = product::ActiveModel {
            product_name: Set(product_name.clone()),
            category_id: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        products_created += 1;

        for (column, value) in sheet.columns().iter().zip(row).skip(1) {
            if is_missing(value) {
                continue;
            }
            let attribute_id = *attribute_ids
                .get(column)
                .ok_or_else(|| Error::AttributeNotFound {
                    name: column.clone(),
                })?;

            let mapping = attribute_value_mapping::ActiveModel {
                attribute_id: Set(attribute_id),
                value: Set(value.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            ProductAttributeMapping::insert(product_attribute_mapping::ActiveModel {
                product_id: Set(product.id),
                mapping_id: Set(mapping.id),
            })
            .exec_without_returning(&txn)
            .await?;
            mappings_created += 1;
        }
    }

    txn.commit().await?;

    let summary = ImportSummary {
        attributes_created,
        mappings_created,
        products_created,
    };
    info!(
        "Imported sheet: {} new attributes, {} mappings, {} products",
        summary.attributes_created, summary.mappings_created, summary.products_created
    );
    Ok(summary)
}

async fn ensure_attributes<C: ConnectionTrait>(db: &C, columns: &[String]) -> Result<()> {
    if columns.is_empty() {
        return Ok(());
    }

    let attributes = columns.iter().map(|name| dynamic_attribute::ActiveModel {
        name: Set(name.clone()),
        ..Default::default()
    });

    DynamicAttribute::insert_many(attributes)
        .on_conflict(
            OnConflict::column(dynamic_attribute::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;
    Ok(())
}

async fn attribute_ids_by_name<C: ConnectionTrait>(
    db: &C,
    columns: &[String],
) -> Result<HashMap<String, i64>> {
    Ok(DynamicAttribute::find()
        .filter(dynamic_attribute::Column::Name.is_in(columns.iter().cloned()))
        .all(db)
        .await?
        .into_iter()
        .map(|attribute| (attribute.name, attribute.id))
        .collect())
}

async fn insert_cell_mappings<C: ConnectionTrait>(
    db: &C,
    sheet: &Sheet,
    attribute_ids: &HashMap<String, i64>,
) -> Result<u64> {
    let mut batch = Vec::new();
    for row in sheet.rows() {
        for (column, value) in sheet.columns().iter().zip(row) {
            if is_missing(value) {
                continue;
            }
            let attribute_id = *attribute_ids
                .get(column)
                .ok_or_else(|| Error::AttributeNotFound {
                    name: column.clone(),
                })?;
            batch.push(attribute_value_mapping::ActiveModel {
                attribute_id: Set(attribute_id),
                value: Set(value.clone()),
                ..Default::default()
            });
        }
    }

    let inserted = batch.len() as u64;
    for chunk in batch.chunks(MAPPING_CHUNK) {
        AttributeValueMapping::insert_many(chunk.iter().cloned())
            .exec(db)
            .await?;
    }
    Ok(inserted)
}
