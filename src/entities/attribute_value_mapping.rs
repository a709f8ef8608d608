//! Attribute value mapping entity - a single realised (attribute, value) pair.
//!
//! Values are stored as the cell's text form and are not deduplicated: two cells with
//! the same text produce two rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attribute value mapping database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attribute_value_mappings")]
pub struct Model {
    /// Unique identifier for the mapping
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Attribute this value belongs to
    pub attribute_id: i64,
    /// Cell text
    pub value: String,
}

/// Defines relationships between `AttributeValueMapping` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each mapping belongs to one attribute
    #[sea_orm(
        belongs_to = "super::dynamic_attribute::Entity",
        from = "Column::AttributeId",
        to = "super::dynamic_attribute::Column::Id",
        on_delete = "Cascade"
    )]
    Attribute,
    /// Join rows linking this mapping to products
    #[sea_orm(has_many = "super::product_attribute_mapping::Entity")]
    ProductLinks,
}

impl Related<super::dynamic_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attribute.def()
    }
}

impl Related<super::product_attribute_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductLinks.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_attribute_mapping::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_attribute_mapping::Relation::Mapping.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
