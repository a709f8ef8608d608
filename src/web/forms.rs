//! Upload form parsing and validation.

use axum::extract::Multipart;
use validator::{Validate, ValidationErrors};

/// Multipart field carrying the spreadsheet
pub const FILE_FIELD: &str = "excel_file";

/// The submitted upload form
#[derive(Debug, Default, Validate)]
pub struct UploadForm {
    /// Client-side file name, used to pick the reader
    #[validate(length(min = 1, message = "No file was submitted."))]
    pub file_name: String,
    /// Raw file bytes
    #[validate(length(min = 1, message = "The submitted file is empty."))]
    pub contents: Vec<u8>,
}

impl UploadForm {
    /// Collects the file field from a multipart body. Other fields are ignored.
    ///
    /// # Errors
    /// Returns the multipart error if the body cannot be read.
    pub async fn from_multipart(
        mut multipart: Multipart,
    ) -> Result<Self, axum::extract::multipart::MultipartError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            form.file_name = field.file_name().unwrap_or_default().to_string();
            form.contents = field.bytes().await?.to_vec();
        }
        Ok(form)
    }
}

/// Flattens validation errors into display messages, sorted for stable output.
#[must_use]
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, field_errors)| {
            field_errors.iter().map(|error| {
                error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages
}
