//! Router for the summary form.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::page;
use crate::api::types::ApiContext;

/// Build the router: the form page, its summary action and a health probe.
///
/// `max_upload_bytes` bounds the whole multipart body.
pub fn summary_router(ctx: ApiContext, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(page::serve_form))
        .route("/api/summarize", post(endpoints::summarize::summarize))
        .route("/health", get(endpoints::health::check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
