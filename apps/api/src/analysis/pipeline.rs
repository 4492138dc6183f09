//! Per-action analysis pipeline.
//!
//! Flow: validate inputs → extract resume text → analyze → build view.
//! Each call owns its outcome; nothing is shared between actions or sessions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::RelevanceAnalyzer;
use crate::analysis::models::AnalysisResult;
use crate::analysis::view::AnalysisView;
use crate::errors::AppError;
use crate::extraction::{extract_blocking, ExtractionError, UploadedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Extracting,
    Analyzing,
    Succeeded,
    Failed,
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisPhase::Extracting => "extracting",
            AnalysisPhase::Analyzing => "analyzing",
            AnalysisPhase::Succeeded => "succeeded",
            AnalysisPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Everything produced by one successful analysis action.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    /// Log correlation only; outcomes are never stored.
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub view: AnalysisView,
}

/// Runs one user-triggered analysis. Inputs are checked before any extraction
/// or remote work starts; any failure halts the pipeline with no partial result.
pub async fn run_analysis(
    resume: Option<UploadedDocument>,
    job_description: Option<String>,
    analyzer: &RelevanceAnalyzer,
) -> Result<AnalysisOutcome, AppError> {
    let (resume, job_description) = validate_inputs(resume, job_description)?;

    let analysis_id = Uuid::new_v4();
    let span = tracing::info_span!("analysis", %analysis_id);

    let outcome = execute(analysis_id, resume, &job_description, analyzer)
        .instrument(span.clone())
        .await;

    span.in_scope(|| match &outcome {
        Ok(o) => info!(phase = %AnalysisPhase::Succeeded, score = o.result.score, "Analysis complete"),
        Err(e) => warn!(phase = %AnalysisPhase::Failed, "Analysis failed: {e}"),
    });

    outcome
}

fn validate_inputs(
    resume: Option<UploadedDocument>,
    job_description: Option<String>,
) -> Result<(UploadedDocument, String), AppError> {
    let resume = resume.filter(|doc| !doc.bytes.is_empty());
    let job_description = job_description.filter(|jd| !jd.trim().is_empty());

    match (resume, job_description) {
        (Some(resume), Some(jd)) => Ok((resume, jd)),
        _ => Err(AppError::Validation(
            "Please upload a resume and provide a job description.".to_string(),
        )),
    }
}

async fn execute(
    analysis_id: Uuid,
    resume: UploadedDocument,
    job_description: &str,
    analyzer: &RelevanceAnalyzer,
) -> Result<AnalysisOutcome, AppError> {
    info!(
        phase = %AnalysisPhase::Extracting,
        content_type = %resume.content_type,
        bytes = resume.bytes.len(),
        "Extracting resume text"
    );
    let resume_text = extract_blocking(resume).await?;
    if resume_text.trim().is_empty() {
        return Err(ExtractionError::NoExtractableText.into());
    }

    info!(phase = %AnalysisPhase::Analyzing, model = analyzer.model(), "Requesting analysis");
    let result = analyzer.analyze(&resume_text, job_description).await?;

    Ok(AnalysisOutcome {
        analysis_id,
        analyzed_at: Utc::now(),
        view: AnalysisView::from_result(&result),
        result,
    })
}
