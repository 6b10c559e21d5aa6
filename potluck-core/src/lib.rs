//! Recipe visibility, lifecycle, composition and collections engine.
//!
//! Every operation takes the store as `&dyn EntityStore` plus the acting user
//! (for writes) or a [`Principal`] (for reads). Failures are [`EngineError`]s.

pub mod collections;
pub mod composition;
pub mod error;
pub mod extraction;
pub mod import;
pub mod lifecycle;
pub mod listing;
pub mod profiles;
pub mod store;
pub mod types;
pub mod validation;
pub mod visibility;

pub use collections::{create_cookbook, toggle_cookbook_membership, toggle_save, update_cookbook};
pub use composition::{resolve_includes, set_components, used_in};
pub use error::{EngineError, EngineResult};
pub use extraction::{
    create_extractor_from_env, ExtractedRecipe, ExtractionError, FakeExtractor, HttpExtractor,
    RecipeExtractor,
};
pub use import::import_recipe;
pub use lifecycle::{
    clone_recipe, create_recipe, empty_trash, hard_delete_recipe, publish_recipe,
    purge_cookbook, restore_cookbook, restore_recipe, set_favorite, soft_delete_cookbook,
    soft_delete_recipe, unpublish_recipe, update_recipe, Transition,
};
pub use listing::{
    cookbooks_containing, get_cookbook, get_recipe, is_saved, list_cookbook_recipes,
    list_cookbook_trash, list_cookbooks, list_own_recipes, list_profile_cookbooks,
    list_profile_recipes, list_saved, list_trash, OwnRecipeQuery,
};
pub use profiles::{claim_username, get_profile_by_username};
pub use store::{
    CookbookFilter, EntityStore, GraphCheck, MemoryStore, OwnerGraph, RecipeFilter, StoreError,
    StoreResult,
};
pub use types::{
    ComponentLink, Cookbook, CookbookRecipeLink, CookbookUpdate, Cover, Difficulty,
    IncludedRecipe, MembershipToggle, Principal, Profile, Recipe, RecipeDraft, RecipeState,
    SaveToggle, SavedEntry, SavedRecipe,
};
pub use visibility::{can_mutate_cookbook, can_mutate_recipe, can_view_cookbook, can_view_recipe, Access};
