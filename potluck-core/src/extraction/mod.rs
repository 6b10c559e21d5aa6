//! Recipe extraction service abstraction.
//!
//! An extractor turns the text of a web page into a best-effort structured
//! guess. Its output is untrusted: [`crate::import::import_recipe`] runs it
//! through the same validation as manual entry.

mod fake;
mod http;

pub use fake::FakeExtractor;
pub use http::HttpExtractor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction request failed: {0}")]
    RequestFailed(String),

    #[error("Extraction service returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse extraction response: {0}")]
    ParseError(String),

    #[error("Extractor not configured: {0}")]
    NotConfigured(String),
}

/// Structured guess returned by an extraction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: Option<String>,
    /// Free text; anything other than easy/medium/hard is dropped.
    pub difficulty: Option<String>,
}

#[async_trait]
pub trait RecipeExtractor: Send + Sync + fmt::Debug {
    async fn extract(&self, page_text: &str) -> Result<ExtractedRecipe, ExtractionError>;

    /// Provider name for logs (e.g. "http", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Build the configured extractor.
///
/// - EXTRACTION_PROVIDER: "fake" (default) | "http"
/// - EXTRACTION_ENDPOINT: URL the http provider posts page text to
pub fn create_extractor_from_env() -> Result<Box<dyn RecipeExtractor>, ExtractionError> {
    let provider = std::env::var("EXTRACTION_PROVIDER").unwrap_or_else(|_| "fake".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeExtractor::default())),
        "http" => {
            let endpoint = std::env::var("EXTRACTION_ENDPOINT").map_err(|_| {
                ExtractionError::NotConfigured("EXTRACTION_ENDPOINT not set".to_string())
            })?;
            Ok(Box::new(HttpExtractor::new(endpoint)))
        }
        other => Err(ExtractionError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
