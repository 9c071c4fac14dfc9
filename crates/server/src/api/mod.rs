pub mod files;
pub mod health;
pub mod modal;
pub mod page;
pub mod schemas;
pub mod send;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use minijinja::Environment;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::workflow::Workflow;

/// Default request body limit when none is configured.
const DEFAULT_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The upload / send workflow.
    pub workflow: Arc<Workflow>,
    /// Page templates.
    pub pages: Arc<Environment<'static>>,
    /// Maximum accepted request body in bytes.
    pub max_request_bytes: usize,
}

impl AppState {
    pub fn new(workflow: Workflow) -> Result<Self, ServerError> {
        Ok(Self {
            workflow: Arc::new(workflow),
            pages: Arc::new(page::environment()?),
            max_request_bytes: DEFAULT_BODY_LIMIT,
        })
    }

    #[must_use]
    pub fn with_max_request_bytes(mut self, limit: usize) -> Self {
        self.max_request_bytes = limit;
        self
    }
}

/// Build the Axum router with the page, the JSON API and downloads.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_request_bytes;

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health::health))
        .route("/api/files", get(files::list_files))
        .route("/api/upload", post(files::upload))
        .route("/api/modal", post(modal::toggle))
        .route("/api/send", post(send::send))
        .route("/download/{filename}", get(files::download))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
