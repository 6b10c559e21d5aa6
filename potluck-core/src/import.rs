//! Create recipes from scraped page text.

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::extraction::{ExtractedRecipe, RecipeExtractor};
use crate::lifecycle::create_recipe;
use crate::store::EntityStore;
use crate::types::{Difficulty, Recipe, RecipeDraft};

/// Run the extraction service over `page_text` and save the result as a new
/// private recipe. The guess is validated exactly like manual entry.
pub async fn import_recipe(
    store: &dyn EntityStore,
    extractor: &dyn RecipeExtractor,
    actor: Uuid,
    page_text: &str,
) -> EngineResult<Recipe> {
    if page_text.trim().is_empty() {
        return Err(EngineError::invalid("Nothing to import"));
    }

    let extracted = extractor.extract(page_text).await.inspect_err(|e| {
        tracing::warn!(
            provider = extractor.provider_name(),
            error = %e,
            "recipe extraction failed"
        );
    })?;

    let recipe = create_recipe(store, actor, draft_from_extracted(extracted))?;
    tracing::info!(
        recipe_id = %recipe.id,
        provider = extractor.provider_name(),
        "recipe imported"
    );
    Ok(recipe)
}

fn draft_from_extracted(extracted: ExtractedRecipe) -> RecipeDraft {
    RecipeDraft {
        name: extracted.name,
        ingredients: extracted.ingredients,
        steps: extracted.steps,
        category: extracted.category.filter(|c| !c.trim().is_empty()),
        difficulty: extracted.difficulty.as_deref().and_then(Difficulty::parse),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_difficulty_and_blank_category_dropped() {
        let draft = draft_from_extracted(ExtractedRecipe {
            name: "Soup".to_string(),
            ingredients: vec!["water".to_string()],
            steps: vec!["boil".to_string()],
            category: Some("  ".to_string()),
            difficulty: Some("fiendish".to_string()),
        });
        assert_eq!(draft.category, None);
        assert_eq!(draft.difficulty, None);
        assert!(!draft.is_public);
        assert!(!draft.is_component);
    }

    #[test]
    fn test_known_difficulty_kept() {
        let draft = draft_from_extracted(ExtractedRecipe {
            difficulty: Some("Hard".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.difficulty, Some(Difficulty::Hard));
    }
}
