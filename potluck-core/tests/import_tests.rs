//! Importing recipes through the extraction seam.

mod common;

use common::Kitchen;
use potluck_core::{
    import_recipe, Difficulty, EngineError, FakeExtractor, RecipeState,
};

const PAGE: &str = "Best Ever Shakshuka | A Food Blog\n...long story about a trip...";

#[tokio::test]
async fn test_import_creates_private_recipe() {
    let k = Kitchen::new();
    let extractor = FakeExtractor::with_response(
        "shakshuka",
        r#"{
            "name": "  Shakshuka ",
            "ingredients": ["4 eggs", "", "1 can tomatoes"],
            "steps": ["Simmer sauce", "Crack eggs in"],
            "category": "Breakfast",
            "difficulty": "EASY"
        }"#,
    );

    let recipe = import_recipe(&k.store, &extractor, k.anna, PAGE).await.unwrap();
    assert_eq!(recipe.owner_id, k.anna);
    assert_eq!(recipe.name, "Shakshuka");
    assert_eq!(recipe.ingredients, vec!["4 eggs", "1 can tomatoes"]);
    assert_eq!(recipe.category, "Breakfast");
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.state(), RecipeState::Private);
    assert!(!recipe.is_component);
}

#[tokio::test]
async fn test_import_falls_back_to_defaults() {
    let k = Kitchen::new();
    let extractor = FakeExtractor::with_response(
        "shakshuka",
        r#"{"name": "Shakshuka", "ingredients": ["eggs"], "steps": ["cook"],
            "category": "   ", "difficulty": "legendary"}"#,
    );

    let recipe = import_recipe(&k.store, &extractor, k.anna, PAGE).await.unwrap();
    assert_eq!(recipe.category, "Other");
    assert_eq!(recipe.difficulty, Difficulty::Medium);
}

#[tokio::test]
async fn test_import_validates_like_manual_entry() {
    let k = Kitchen::new();
    let extractor = FakeExtractor::with_response(
        "shakshuka",
        r#"{"name": "Shakshuka", "ingredients": [], "steps": ["cook"]}"#,
    );

    let err = import_recipe(&k.store, &extractor, k.anna, PAGE).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::ValidationFailed("Add at least one ingredient".to_string())
    );
}

#[tokio::test]
async fn test_import_rejects_empty_page() {
    let k = Kitchen::new();
    let extractor = FakeExtractor::new();
    assert!(matches!(
        import_recipe(&k.store, &extractor, k.anna, "  \n ").await,
        Err(EngineError::ValidationFailed(_))
    ));
}

#[tokio::test]
async fn test_extractor_failure_is_upstream_unavailable() {
    let k = Kitchen::new();
    let extractor = FakeExtractor::with_response("lasagna", "{}");

    assert!(matches!(
        import_recipe(&k.store, &extractor, k.anna, PAGE).await,
        Err(EngineError::UpstreamUnavailable(_))
    ));
}
