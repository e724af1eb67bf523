//! `POST /api/summarize`, the form's single action.

use axum::extract::{Multipart, State};
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SummaryResponse};
use crate::pipeline::extraction::UploadedFile;

/// Form field carrying the selected model.
pub const MODEL_FIELD: &str = "model";
/// Form field carrying each uploaded record (repeated).
pub const FILES_FIELD: &str = "files";

/// Receives the model choice and uploaded records, then runs the summarizer
/// on the blocking pool. The request stays open until the model answers.
pub async fn summarize(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>, ApiError> {
    let mut model: Option<String> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            MODEL_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable model field: {e}")))?;
                model = Some(value.trim().to_string());
            }
            FILES_FIELD => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
                // Browsers send an empty part when no file was chosen.
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                files.push(UploadedFile::new(filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let model = model
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Choose a model".into()))?;
    if !ctx.is_known_model(&model) {
        return Err(ApiError::BadRequest(format!("Unknown model: {model}")));
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("summarize", %request_id, model = %model, files = files.len());
    tracing::info!(parent: &span, "Summary request received");

    let summarizer = ctx.summarizer.clone();
    let report = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        summarizer.summarize(&model, &files)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Summary worker failed: {e}")))??;

    Ok(Json(SummaryResponse::from(report)))
}
