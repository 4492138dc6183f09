// Resume relevance analysis: prompt contract, remote model call, response parsing,
// and the per-action pipeline that feeds it from the text extractor.
// All model calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod view;
