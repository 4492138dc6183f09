//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::analysis::pipeline::{run_analysis, AnalysisOutcome};
use crate::errors::AppError;
use crate::extraction::{resolve_content_type, UploadedDocument};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /api/v1/analyze
///
/// multipart/form-data with a `resume` file part (PDF or DOCX) and a
/// `job_description` text part. Unknown parts are ignored.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let mut resume: Option<UploadedDocument> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = resolve_content_type(field.content_type(), file_name.as_deref());
                let bytes: Bytes = field.bytes().await?;
                resume = Some(UploadedDocument {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            JOB_DESCRIPTION_FIELD => job_description = Some(field.text().await?),
            _ => {}
        }
    }

    let outcome = run_analysis(resume, job_description, &state.analyzer).await?;
    Ok(Json(outcome))
}
