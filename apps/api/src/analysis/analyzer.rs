//! Relevance Analyzer — one prompt, one model call, one parsed `AnalysisResult`.
//!
//! No caching: identical inputs always trigger a fresh remote call.
//! No retries: a failed call is terminal for that user action.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::analysis::models::{AnalysisResult, RawAnalysis};
use crate::analysis::prompts::build_prompt;
use crate::llm_client::{strip_json_fences, CompletionRequest, LlmError, TextGenerator};

/// Settings the analyzer is constructed with. The key stays optional so a
/// missing credential is reported per call instead of at startup.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Google API key is not configured. Set GOOGLE_API_KEY in the environment or .env file.")]
    MissingApiKey,

    #[error("An error occurred with the AI model: {0}")]
    Llm(#[from] LlmError),

    #[error("The AI model response was not the expected JSON object: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("The AI model returned a score outside 0-100: {0}")]
    ScoreOutOfRange(f64),
}

#[derive(Clone)]
pub struct RelevanceAnalyzer {
    config: AnalyzerConfig,
    generator: Arc<dyn TextGenerator>,
}

impl RelevanceAnalyzer {
    pub fn new(config: AnalyzerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self { config, generator }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Scores `resume_text` against `jd_text`.
    ///
    /// Returns `MissingApiKey` without touching the network when no key is configured.
    pub async fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalyzerError::MissingApiKey)?;

        let prompt = build_prompt(resume_text, jd_text);
        let raw = self
            .generator
            .generate(CompletionRequest {
                api_key,
                model: &self.config.model,
                prompt: &prompt,
            })
            .await?;

        debug!("Model returned {} chars", raw.len());
        parse_analysis(&raw)
    }
}

/// Fence-strips and parses raw model output into an `AnalysisResult`.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, AnalyzerError> {
    let wire: RawAnalysis = serde_json::from_str(strip_json_fences(raw))?;
    wire.into_result().map_err(AnalyzerError::ScoreOutOfRange)
}
