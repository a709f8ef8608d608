//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attribute_value_mapping;
pub mod dynamic_attribute;
pub mod product;
pub mod product_attribute_mapping;
pub mod product_category;

// Re-export specific types to avoid conflicts
pub use attribute_value_mapping::{
    Column as AttributeValueMappingColumn, Entity as AttributeValueMapping,
    Model as AttributeValueMappingModel,
};
pub use dynamic_attribute::{
    Column as DynamicAttributeColumn, Entity as DynamicAttribute, Model as DynamicAttributeModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_attribute_mapping::{
    Column as ProductAttributeMappingColumn, Entity as ProductAttributeMapping,
    Model as ProductAttributeMappingModel,
};
pub use product_category::{
    Column as ProductCategoryColumn, Entity as ProductCategory, Model as ProductCategoryModel,
};
