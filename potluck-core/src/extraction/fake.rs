//! Fake extractor for tests and local development.
//!
//! Returns canned JSON keyed by a substring of the page text, so import flows
//! can be exercised without a network.

use super::{ExtractedRecipe, ExtractionError, RecipeExtractor};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug)]
pub struct FakeExtractor {
    /// Map of page-text substring -> JSON response
    responses: RwLock<HashMap<String, String>>,
    /// Used when nothing matches
    default_response: Option<String>,
}

impl Default for FakeExtractor {
    /// Echo mode: the first non-blank line becomes the name, the second the
    /// only ingredient, and the remaining lines the steps.
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(page_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(page_contains, response);
        provider
    }

    /// Register a JSON response for pages containing `page_contains`
    /// (case-insensitive).
    pub fn add_response(&self, page_contains: &str, response: &str) {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(page_contains.to_lowercase(), response.to_string());
        }
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    fn lookup(&self, page_text: &str) -> Option<String> {
        let lowered = page_text.to_lowercase();
        let responses = self.responses.read().ok()?;
        responses
            .iter()
            .find(|(needle, _)| lowered.contains(needle.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
    }
}

fn echo(page_text: &str) -> ExtractedRecipe {
    let mut lines = page_text.lines().map(str::trim).filter(|l| !l.is_empty());
    let name = lines.next().unwrap_or_default().to_string();
    let rest: Vec<String> = lines.map(str::to_string).collect();
    ExtractedRecipe {
        name,
        ingredients: rest.first().cloned().into_iter().collect(),
        steps: rest.get(1..).map(|s| s.to_vec()).unwrap_or_default(),
        category: None,
        difficulty: None,
    }
}

#[async_trait]
impl RecipeExtractor for FakeExtractor {
    async fn extract(&self, page_text: &str) -> Result<ExtractedRecipe, ExtractionError> {
        let has_registered = self
            .responses
            .read()
            .map(|r| !r.is_empty())
            .unwrap_or(false);

        match self.lookup(page_text) {
            Some(response) => serde_json::from_str(&response)
                .map_err(|e| ExtractionError::ParseError(e.to_string())),
            None if has_registered => Err(ExtractionError::RequestFailed(
                "No fake response registered for page".to_string(),
            )),
            None => Ok(echo(page_text)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_extractor_matching() {
        let extractor = FakeExtractor::with_response(
            "lasagna",
            r#"{"name": "Lasagna", "ingredients": ["pasta"], "steps": ["bake"]}"#,
        );
        let result = extractor.extract("Grandma's LASAGNA recipe").await.unwrap();
        assert_eq!(result.name, "Lasagna");
        assert_eq!(result.steps, vec!["bake"]);
    }

    #[tokio::test]
    async fn test_fake_extractor_no_match() {
        let extractor = FakeExtractor::with_response("lasagna", "{}");
        assert!(extractor.extract("soup").await.is_err());
    }

    #[tokio::test]
    async fn test_fake_extractor_default_response() {
        let extractor = FakeExtractor::with_response("lasagna", "{}")
            .with_default_response(r#"{"name": "Anything"}"#);
        let result = extractor.extract("soup").await.unwrap();
        assert_eq!(result.name, "Anything");
    }

    #[tokio::test]
    async fn test_fake_extractor_bad_json() {
        let extractor = FakeExtractor::with_response("soup", "not json");
        assert!(matches!(
            extractor.extract("soup").await,
            Err(ExtractionError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_echo_mode() {
        let extractor = FakeExtractor::new();
        let result = extractor
            .extract("Flatbread\n\n2 cups flour\nMix\nBake")
            .await
            .unwrap();
        assert_eq!(result.name, "Flatbread");
        assert_eq!(result.ingredients, vec!["2 cups flour"]);
        assert_eq!(result.steps, vec!["Mix", "Bake"]);
    }
}
