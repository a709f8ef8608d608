//! Unified error type for the catalogue.
//!
//! Every fallible operation in the crate returns [`Result`]. The web layer turns these
//! errors into inline form messages or flash notifications; nothing here is HTTP-aware.

use thiserror::Error;

/// All errors produced by the catalogue
#[derive(Debug, Error)]
pub enum Error {
    /// Any failure reported by the database driver or ORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The uploaded file could not be read as a table
    #[error("could not read spreadsheet: {message}")]
    SheetParse {
        /// Reader error text
        message: String,
    },

    /// The uploaded file has an extension no reader handles
    #[error("unsupported file type: {file_name}")]
    UnsupportedFile {
        /// Name of the uploaded file
        file_name: String,
    },

    /// The first worksheet (or CSV body) has no header row
    #[error("spreadsheet has no header row")]
    EmptySheet,

    /// Caller supplied an invalid value
    #[error("Invalid input: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// A column name had no stored attribute during import
    #[error("Attribute not found: {name}")]
    AttributeNotFound {
        /// Column name that was looked up
        name: String,
    },

    /// No product with this id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested product id
        id: i64,
    },

    /// No category with this id
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Requested category id
        id: i64,
    },
}

impl From<calamine::Error> for Error {
    fn from(value: calamine::Error) -> Self {
        Self::SheetParse {
            message: value.to_string(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::SheetParse {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
