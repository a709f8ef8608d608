//! Product entity - a named row from an uploaded spreadsheet.
//!
//! Attribute values reach a product through the `product_attribute_mappings` join
//! table; `category_id` is optional and set administratively.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Text of the row's first cell
    pub product_name: String,
    /// Optional category grouping
    pub category_id: Option<i64>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product may belong to one category
    #[sea_orm(
        belongs_to = "super::product_category::Entity",
        from = "Column::CategoryId",
        to = "super::product_category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    /// Join rows linking this product to its mappings
    #[sea_orm(has_many = "super::product_attribute_mapping::Entity")]
    MappingLinks,
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_attribute_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MappingLinks.def()
    }
}

impl Related<super::attribute_value_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_attribute_mapping::Relation::Mapping.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_attribute_mapping::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
