//! Text Extractor — turns an uploaded resume document into plain text.
//!
//! PDF pages are concatenated in page order; DOCX paragraphs are joined with `\n`.
//! Any other declared MIME type yields an empty string rather than an error.

pub mod docx;
pub mod pdf;

use std::any::Any;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read the PDF document: {0}")]
    Pdf(String),

    #[error("Could not read the DOCX document: {0}")]
    Docx(String),

    #[error("No text could be extracted from the resume")]
    NoExtractableText,

    #[error("Document extraction worker failed: {0}")]
    Worker(String),
}

/// The document formats the extractor understands, keyed off the declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported(String),
}

impl DocumentKind {
    /// Matches the essence of the MIME type: parameters are dropped and case is ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            DocumentKind::Pdf
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            DocumentKind::Docx
        } else {
            DocumentKind::Unsupported(essence.to_string())
        }
    }
}

/// An uploaded file. Lives for one request; the bytes were read from the upload once.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_mime(&self.content_type)
    }
}

/// Picks the MIME type to extract with. The declared type wins unless it is
/// missing or the generic `application/octet-stream`, in which case a `.pdf` or
/// `.docx` file name stands in for it.
pub fn resolve_content_type(declared: Option<&str>, file_name: Option<&str>) -> String {
    let declared = declared.map(str::trim).filter(|m| !m.is_empty());
    if let Some(mime) = declared {
        if !mime.eq_ignore_ascii_case("application/octet-stream") {
            return mime.to_string();
        }
    }

    let extension = file_name
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => PDF_MIME.to_string(),
        "docx" => DOCX_MIME.to_string(),
        _ => declared.unwrap_or("application/octet-stream").to_string(),
    }
}

/// Extracts the text of `document`.
///
/// `Ok("")` for unsupported types. `Err` when the bytes cannot be decoded as the
/// declared type, so callers can tell "nothing extracted" from "unreadable".
pub fn extract(document: &UploadedDocument) -> Result<String, ExtractionError> {
    let text = match document.kind() {
        DocumentKind::Pdf => pdf::extract_pdf_text(&document.bytes)?,
        DocumentKind::Docx => docx::extract_docx_text(&document.bytes)?,
        DocumentKind::Unsupported(mime) => {
            // Pass-through kept as observed; likely should become a typed error.
            warn!(
                "Unsupported resume type '{mime}' ({}), returning empty text",
                document.file_name.as_deref().unwrap_or("unnamed")
            );
            return Ok(String::new());
        }
    };

    debug!(
        "Extracted {} chars from {} byte document",
        text.len(),
        document.bytes.len()
    );
    Ok(text)
}

/// Runs [`extract`] on the blocking pool. PDF decoding is CPU-bound, and the
/// decoder panics rather than erroring on many structural defects, so a panic is
/// reported as a decode failure of the document's kind. Only a cancelled task
/// surfaces as `ExtractionError::Worker`.
pub async fn extract_blocking(document: UploadedDocument) -> Result<String, ExtractionError> {
    let kind = document.kind();
    match tokio::task::spawn_blocking(move || extract(&document)).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => {
            let reason = panic_reason(err.into_panic());
            warn!("Document decoder panicked on {kind:?} input: {reason}");
            let message = format!("the file is corrupt or malformed ({reason})");
            Err(match kind {
                DocumentKind::Pdf => ExtractionError::Pdf(message),
                DocumentKind::Docx => ExtractionError::Docx(message),
                DocumentKind::Unsupported(_) => ExtractionError::Worker(message),
            })
        }
        Err(err) => Err(ExtractionError::Worker(err.to_string())),
    }
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        (*reason).to_string()
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason.clone()
    } else {
        "decoder panicked".to_string()
    }
}
