//! Request handlers for the upload and listing pages.

use super::{
    AppState, PRODUCTS_PATH, UPLOAD_PATH, flash,
    forms::{UploadForm, error_messages},
    templates::{self, ProductListPage, UploadPage},
};
use crate::{
    core::{
        attribute,
        importer::{self, ImportSummary},
        product,
        sheet::Sheet,
    },
    errors::Result,
};
use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use validator::Validate;

/// `GET /` - the listing is the landing page.
pub async fn index() -> Redirect {
    Redirect::to(PRODUCTS_PATH)
}

/// `GET /upload/` - shows the form and consumes any pending flash message.
pub async fn upload_form(headers: HeaderMap) -> Response {
    let flash = flash::read(&headers);
    let clear = flash.is_some();
    let html = Html(templates::render_upload_page(&UploadPage {
        flash,
        errors: Vec::new(),
    }));

    if clear {
        ([(header::SET_COOKIE, flash::clear_cookie())], html).into_response()
    } else {
        html.into_response()
    }
}

/// `POST /upload/` - validates the form, imports the file, and redirects.
///
/// Validation errors re-render the form inline. Import errors redirect back to the
/// form with a flash message; nothing from the failed import is kept.
pub async fn upload_submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match UploadForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!("Could not read upload body: {e}");
            return render_form_errors(vec![e.body_text()]);
        }
    };

    if let Err(errors) = form.validate() {
        return render_form_errors(error_messages(&errors));
    }

    match process_upload(&state.database, &form).await {
        Ok(summary) => {
            info!(
                "Upload {} imported {} products",
                form.file_name, summary.products_created
            );
            Redirect::to(PRODUCTS_PATH).into_response()
        }
        Err(e) => {
            error!("Failed to process upload {}: {e}", form.file_name);
            let message = format!("Failed to process excel file {e}");
            (
                [(header::SET_COOKIE, flash::set_cookie(&message))],
                Redirect::to(UPLOAD_PATH),
            )
                .into_response()
        }
    }
}

/// `GET /products/` - every product and every attribute, unpaginated.
pub async fn product_list(State(state): State<AppState>) -> Response {
    match load_product_list(&state.database).await {
        Ok(page) => Html(templates::render_product_list(&page)).into_response(),
        Err(e) => {
            error!("Failed to load product list: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::render_error_page("The product list could not be loaded.")),
            )
                .into_response()
        }
    }
}

async fn process_upload(db: &DatabaseConnection, form: &UploadForm) -> Result<ImportSummary> {
    let sheet = Sheet::from_upload(&form.file_name, &form.contents)?;
    importer::import_sheet(db, &sheet).await
}

async fn load_product_list(db: &DatabaseConnection) -> Result<ProductListPage> {
    let attributes = attribute::list_attributes(db)
        .await?
        .into_iter()
        .map(|attribute| attribute.name)
        .collect();
    let products = product::list_product_rows(db).await?;
    Ok(ProductListPage {
        attributes,
        products,
    })
}

fn render_form_errors(errors: Vec<String>) -> Response {
    Html(templates::render_upload_page(&UploadPage {
        flash: None,
        errors,
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        entities::{AttributeValueMapping, DynamicAttribute, Product},
        test_utils::*,
        web::router,
    };
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use sea_orm::{EntityTrait, PaginatorTrait};
    use tower::ServiceExt;

    const BOUNDARY: &str = "dynamic-product-test-boundary";

    fn upload_request(file_name: &str, contents: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"excel_file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(UPLOAD_PATH)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn empty_form_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(UPLOAD_PATH)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"comment\"\r\n\r\n\
                 no file attached\r\n\
                 --{BOUNDARY}--\r\n"
            )))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(db: &DatabaseConnection, request: Request<Body>) -> Response {
        router(AppState::new(db.clone()), 1024 * 1024)
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_form_renders() -> Result<()> {
        let db = setup_test_db().await?;

        let response = send(&db, get_request(UPLOAD_PATH)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(response).await.contains("name=\"excel_file\""));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_redirects_to_listing() -> Result<()> {
        let db = setup_test_db().await?;

        let response = send(&db, get_request("/")).await;
        assert!(response.status().is_redirection());
        assert_eq!(location(&response), PRODUCTS_PATH);

        Ok(())
    }

    #[tokio::test]
    async fn test_successful_upload_redirects_to_listing() -> Result<()> {
        let db = setup_test_db().await?;

        let response = send(&db, upload_request("products.csv", SAMPLE_CSV.as_bytes())).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), PRODUCTS_PATH);

        assert_eq!(Product::find().count(&db).await?, 2);
        assert_eq!(DynamicAttribute::find().count(&db).await?, 3);

        let listing = body_text(send(&db, get_request(PRODUCTS_PATH)).await).await;
        assert!(listing.contains("<td>Shirt</td>"));
        assert!(listing.contains("<td>Pants</td>"));
        assert!(listing.contains("<li>Color</li>"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_rerenders_form() -> Result<()> {
        let db = setup_test_db().await?;

        let response = send(&db, empty_form_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("No file was submitted."));
        assert_eq!(Product::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_file_rerenders_form() -> Result<()> {
        let db = setup_test_db().await?;

        let response = send(&db, upload_request("products.csv", b"")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("The submitted file is empty."));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_file_leaves_tables_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        send(&db, upload_request("products.csv", SAMPLE_CSV.as_bytes())).await;

        let response = send(&db, upload_request("products.xlsx", b"not a workbook")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), UPLOAD_PATH);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("flash="));

        assert_eq!(Product::find().count(&db).await?, 2);
        assert_eq!(DynamicAttribute::find().count(&db).await?, 3);
        assert_eq!(AttributeValueMapping::find().count(&db).await?, 10);

        // The message is shown once on the next form view and then cleared.
        let pair = cookie.split("; ").next().unwrap().to_string();
        let request = Request::builder()
            .uri(UPLOAD_PATH)
            .header(header::COOKIE, pair)
            .body(Body::empty())
            .unwrap();
        let response = send(&db, request).await;
        let cleared = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cleared.contains("Max-Age=0"));
        let html = body_text(response).await;
        assert!(html.contains("Failed to process excel file"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unsupported_extension_flashes_error() -> Result<()> {
        let db = setup_test_db().await?;

        let response = send(&db, upload_request("products.txt", SAMPLE_CSV.as_bytes())).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), UPLOAD_PATH);
        assert_eq!(Product::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_returns_products_from_every_upload() -> Result<()> {
        let db = setup_test_db().await?;

        let mut csv = String::from("ProductName,Color\n");
        for i in 0..60 {
            csv.push_str(&format!("Item {i},Red\n"));
        }
        send(&db, upload_request("first.csv", csv.as_bytes())).await;
        send(&db, upload_request("second.csv", SAMPLE_CSV.as_bytes())).await;

        let response = send(&db, get_request(PRODUCTS_PATH)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert_eq!(html.matches("<tr><td>").count(), 62);
        assert!(html.contains("<td>Item 59</td>"));
        assert!(html.contains("<td>Pants</td>"));

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_escapes_cell_content() -> Result<()> {
        let db = setup_test_db().await?;

        let csv = "ProductName,Note\n<script>x</script>,a & b\n";
        send(&db, upload_request("products.csv", csv.as_bytes())).await;

        let html = body_text(send(&db, get_request(PRODUCTS_PATH)).await).await;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("a &amp; b"));

        Ok(())
    }
}
