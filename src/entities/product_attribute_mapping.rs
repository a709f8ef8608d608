//! Product/mapping join entity.
//!
//! The many-to-many link between products and attribute value mappings is an explicit
//! table with a composite primary key. Removing either side removes the link.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_attribute_mappings")]
pub struct Model {
    /// Linked product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Linked attribute value mapping
    #[sea_orm(primary_key, auto_increment = false)]
    pub mapping_id: i64,
}

/// Both sides of the link
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The product side
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// The mapping side
    #[sea_orm(
        belongs_to = "super::attribute_value_mapping::Entity",
        from = "Column::MappingId",
        to = "super::attribute_value_mapping::Column::Id",
        on_delete = "Cascade"
    )]
    Mapping,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::attribute_value_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mapping.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
