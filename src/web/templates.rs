//! Server-rendered pages.
//!
//! Each page takes a serialisable context and returns HTML. Every interpolated value
//! goes through [`escape_html`]; spreadsheet content is untrusted.

use crate::core::product::ProductRow;
use serde::Serialize;

/// Context for the upload form
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadPage {
    /// Message carried over from a failed import
    pub flash: Option<String>,
    /// Inline form validation errors
    pub errors: Vec<String>,
}

/// Context for the product listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductListPage {
    /// Every known attribute name, in first-seen order
    pub attributes: Vec<String>,
    /// Every product
    pub products: Vec<ProductRow>,
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

/// Renders the upload form with any flash message and validation errors.
#[must_use]
pub fn render_upload_page(page: &UploadPage) -> String {
    let mut body = String::from("<h1>Upload products</h1>\n");

    if let Some(message) = &page.flash {
        body.push_str(&format!(
            "<p class=\"message error\">{}</p>\n",
            escape_html(message)
        ));
    }
    if !page.errors.is_empty() {
        body.push_str("<ul class=\"errorlist\">\n");
        for error in &page.errors {
            body.push_str(&format!("<li>{}</li>\n", escape_html(error)));
        }
        body.push_str("</ul>\n");
    }

    body.push_str(
        "<form method=\"post\" action=\"/upload/\" enctype=\"multipart/form-data\">\n\
         <label for=\"excel_file\">Spreadsheet</label>\n\
         <input type=\"file\" id=\"excel_file\" name=\"excel_file\" \
         accept=\".xlsx,.xls,.xlsm,.xlsb,.ods,.csv\" required>\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <p><a href=\"/products/\">View products</a></p>\n",
    );

    layout("Upload products", &body)
}

/// Renders every product as a table row with one column per attribute.
#[must_use]
pub fn render_product_list(page: &ProductListPage) -> String {
    let mut body = String::from("<h1>Products</h1>\n");

    if page.products.is_empty() {
        body.push_str("<p>No products uploaded yet.</p>\n");
    } else {
        body.push_str("<table>\n<thead>\n<tr><th>Product</th><th>Category</th>");
        for attribute in &page.attributes {
            body.push_str(&format!("<th>{}</th>", escape_html(attribute)));
        }
        body.push_str("</tr>\n</thead>\n<tbody>\n");

        for product in &page.products {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td>",
                escape_html(&product.product_name),
                escape_html(product.category.as_deref().unwrap_or(""))
            ));
            for attribute in &page.attributes {
                body.push_str(&format!(
                    "<td>{}</td>",
                    escape_html(product.value_for(attribute).unwrap_or(""))
                ));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str("<h2>Attributes</h2>\n<ul class=\"attributes\">\n");
    for attribute in &page.attributes {
        body.push_str(&format!("<li>{}</li>\n", escape_html(attribute)));
    }
    body.push_str("</ul>\n<p><a href=\"/upload/\">Upload another file</a></p>\n");

    layout("Products", &body)
}

/// Minimal page for unexpected server errors.
#[must_use]
pub fn render_error_page(message: &str) -> String {
    layout(
        "Error",
        &format!("<h1>Something went wrong</h1>\n<p>{}</p>\n", escape_html(message)),
    )
}
