//! HTTP interface.
//!
//! Three pages: the upload form (`/upload/`), its submission, and the product listing
//! (`/products/`). Handlers are thin; parsing and import live in [`crate::core`].

/// Pending-message cookie helpers
pub mod flash;
/// Upload form parsing and validation
pub mod forms;
/// Request handlers
pub mod handlers;
/// HTML rendering
pub mod templates;

use crate::{config::app::AppConfig, errors::Result};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Path of the upload form
pub const UPLOAD_PATH: &str = "/upload/";
/// Path of the product listing
pub const PRODUCTS_PATH: &str = "/products/";

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Builds the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            UPLOAD_PATH,
            get(handlers::upload_form).post(handlers::upload_submit),
        )
        .route(PRODUCTS_PATH, get(handlers::product_list))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(config: &AppConfig, database: DatabaseConnection) -> Result<()> {
    let app = router(AppState::new(database), config.upload.max_bytes);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
