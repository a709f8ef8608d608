//! Core business logic, independent of the HTTP layer.

/// Dynamic attribute queries
pub mod attribute;
/// Administrative category operations
pub mod category;
/// Spreadsheet-to-records import
pub mod importer;
/// Product queries for the listing
pub mod product;
/// Spreadsheet parsing and missing-value detection
pub mod sheet;
