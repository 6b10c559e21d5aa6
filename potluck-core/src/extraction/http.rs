//! Extractor backed by an external HTTP service.

use super::{ExtractedRecipe, ExtractionError, RecipeExtractor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct HttpExtractor {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpExtractor {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractErrorResponse {
    error: String,
}

#[async_trait]
impl RecipeExtractor for HttpExtractor {
    async fn extract(&self, page_text: &str) -> Result<ExtractedRecipe, ExtractionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExtractRequest { text: page_text })
            .send()
            .await
            .map_err(|e| ExtractionError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::RequestFailed(e.to_string()))?;

        if status != 200 {
            let message = serde_json::from_str::<ExtractErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ExtractionError::ApiError { status, message });
        }

        serde_json::from_str(&body).map_err(|e| ExtractionError::ParseError(e.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
