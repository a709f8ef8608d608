//! Dynamic attribute entity - one row per distinct spreadsheet column header.
//!
//! `name` carries a storage-level `UNIQUE` constraint; imports insert with
//! `ON CONFLICT DO NOTHING` so a header seen before is silently reused.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dynamic attribute database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dynamic_attributes")]
pub struct Model {
    /// Unique identifier for the attribute
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Column header the attribute was derived from
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between `DynamicAttribute` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One attribute has many realised values
    #[sea_orm(has_many = "super::attribute_value_mapping::Entity")]
    Mappings,
}

impl Related<super::attribute_value_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
