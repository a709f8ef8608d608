//! Dynamic attribute queries.

use crate::{
    entities::{DynamicAttribute, dynamic_attribute},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves every known attribute, in the order the columns were first seen.
pub async fn list_attributes(db: &DatabaseConnection) -> Result<Vec<dynamic_attribute::Model>> {
    DynamicAttribute::find()
        .order_by_asc(dynamic_attribute::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an attribute by its exact column name.
pub async fn get_attribute_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<dynamic_attribute::Model>> {
    DynamicAttribute::find()
        .filter(dynamic_attribute::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}
