use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned when a submission leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Neutral swatch used for cookbooks without an uploaded cover.
pub const DEFAULT_COVER_COLOR: &str = "#9ca3af";

/// The caller on whose behalf an operation runs.
///
/// Resolved by the request layer and passed explicitly into every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    Anonymous,
    User(Uuid),
}

impl Principal {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::Anonymous => None,
            Principal::User(id) => Some(*id),
        }
    }

    /// True when this principal is the given owner.
    pub fn is(&self, owner_id: Uuid) -> bool {
        self.user_id() == Some(owner_id)
    }
}

impl From<Option<Uuid>> for Principal {
    fn from(user_id: Option<Uuid>) -> Self {
        user_id.map(Principal::User).unwrap_or(Principal::Anonymous)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Case-insensitive parse; unknown labels yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Lifecycle state of a recipe, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RecipeState {
    Private,
    Public,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Recipe {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub category: String,
    pub difficulty: Difficulty,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    /// 1-5 stars
    pub rating: Option<i16>,
    pub is_favorite: bool,
    /// Reusable sub-recipe (a sauce, a dough) rather than a standalone dish
    pub is_component: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Build a fresh active recipe from an already-validated draft.
    pub(crate) fn from_draft(owner_id: Uuid, draft: RecipeDraft, now: DateTime<Utc>) -> Self {
        let mut recipe = Recipe {
            id: Uuid::new_v4(),
            owner_id,
            name: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            image_url: None,
            source_url: None,
            category: DEFAULT_CATEGORY.to_string(),
            difficulty: Difficulty::default(),
            prep_minutes: None,
            cook_minutes: None,
            servings: None,
            rating: None,
            is_favorite: false,
            is_component: false,
            is_public: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        recipe.apply_draft(draft, now);
        recipe
    }

    /// Overwrite every editable field with the draft's values.
    pub(crate) fn apply_draft(&mut self, draft: RecipeDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.ingredients = draft.ingredients;
        self.steps = draft.steps;
        self.image_url = draft.image_url;
        self.source_url = draft.source_url;
        self.category = draft
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        self.difficulty = draft.difficulty.unwrap_or_default();
        self.prep_minutes = draft.prep_minutes;
        self.cook_minutes = draft.cook_minutes;
        self.servings = draft.servings;
        self.rating = draft.rating;
        self.is_favorite = draft.is_favorite;
        self.is_component = draft.is_component;
        // Components go public only through publish_recipe, which refuses them.
        if !draft.is_component {
            self.is_public = draft.is_public;
        }
        self.updated_at = now;
        self.enforce_component_invariant();
    }

    /// Component recipes never carry favorite, rating, time or serving metadata.
    pub(crate) fn enforce_component_invariant(&mut self) {
        if self.is_component {
            self.is_favorite = false;
            self.rating = None;
            self.prep_minutes = None;
            self.cook_minutes = None;
            self.servings = None;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn state(&self) -> RecipeState {
        if self.is_deleted() {
            RecipeState::Deleted
        } else if self.is_public {
            RecipeState::Public
        } else {
            RecipeState::Private
        }
    }
}

/// User-submitted recipe content, used for create, edit and import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub rating: Option<i16>,
    pub is_favorite: bool,
    pub is_component: bool,
    pub is_public: bool,
}

impl RecipeDraft {
    /// Seed a draft from an existing recipe, for partial edits.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            image_url: recipe.image_url.clone(),
            source_url: recipe.source_url.clone(),
            category: Some(recipe.category.clone()),
            difficulty: Some(recipe.difficulty),
            prep_minutes: recipe.prep_minutes,
            cook_minutes: recipe.cook_minutes,
            servings: recipe.servings,
            rating: recipe.rating,
            is_favorite: recipe.is_favorite,
            is_component: recipe.is_component,
            is_public: recipe.is_public,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ComponentLink {
    pub parent_id: Uuid,
    pub component_id: Uuid,
}

/// A direct child shown on a recipe page ("includes"), or a parent ("used in").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IncludedRecipe {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<&Recipe> for IncludedRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image_url: recipe.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Cookbook {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub cover_image_url: Option<String>,
    pub cover_color: String,
    pub cover_caption: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// What a cookbook cover renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cover {
    Image { url: String },
    Swatch { color: String, caption: String },
}

impl Cookbook {
    pub(crate) fn named(owner_id: Uuid, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            cover_caption: name.clone(),
            name,
            description: None,
            is_public: false,
            cover_image_url: None,
            cover_color: DEFAULT_COVER_COLOR.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// An uploaded image always wins over the color/caption pair.
    pub fn cover(&self) -> Cover {
        match &self.cover_image_url {
            Some(url) => Cover::Image { url: url.clone() },
            None => Cover::Swatch {
                color: self.cover_color.clone(),
                caption: self.cover_caption.clone(),
            },
        }
    }
}

/// Partial cookbook edit. `Some("")` clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CookbookUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub cover_image_url: Option<String>,
    pub cover_color: Option<String>,
    pub cover_caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CookbookRecipeLink {
    pub cookbook_id: Uuid,
    pub recipe_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SavedRecipe {
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

/// A bookmark together with the recipe it currently resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SavedEntry {
    pub recipe: Recipe,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MembershipToggle {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SaveToggle {
    Saved,
    Unsaved,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: "Pesto".to_string(),
            ingredients: vec!["basil".to_string()],
            steps: vec!["blend".to_string()],
            prep_minutes: Some(10),
            cook_minutes: Some(0),
            servings: Some(4),
            rating: Some(5),
            is_favorite: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_component_strips_metadata() {
        let mut d = draft();
        d.is_component = true;
        let recipe = Recipe::from_draft(Uuid::new_v4(), d, Utc::now());

        assert!(recipe.is_component);
        assert!(!recipe.is_favorite);
        assert_eq!(recipe.rating, None);
        assert_eq!(recipe.prep_minutes, None);
        assert_eq!(recipe.cook_minutes, None);
        assert_eq!(recipe.servings, None);
    }

    #[test]
    fn test_component_draft_cannot_publish() {
        let mut d = draft();
        d.is_component = true;
        d.is_public = true;
        let mut recipe = Recipe::from_draft(Uuid::new_v4(), d.clone(), Utc::now());
        assert!(!recipe.is_public);

        recipe.apply_draft(d, Utc::now());
        assert!(!recipe.is_public);
    }

    #[test]
    fn test_standalone_keeps_metadata() {
        let recipe = Recipe::from_draft(Uuid::new_v4(), draft(), Utc::now());
        assert!(recipe.is_favorite);
        assert_eq!(recipe.rating, Some(5));
        assert_eq!(recipe.servings, Some(4));
        assert_eq!(recipe.category, DEFAULT_CATEGORY);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_state_follows_flags() {
        let mut recipe = Recipe::from_draft(Uuid::new_v4(), draft(), Utc::now());
        assert_eq!(recipe.state(), RecipeState::Private);
        recipe.is_public = true;
        assert_eq!(recipe.state(), RecipeState::Public);
        recipe.deleted_at = Some(Utc::now());
        assert_eq!(recipe.state(), RecipeState::Deleted);
    }

    #[test]
    fn test_cover_prefers_image() {
        let mut cookbook = Cookbook::named(Uuid::new_v4(), "Weeknights".to_string(), Utc::now());
        assert_eq!(
            cookbook.cover(),
            Cover::Swatch {
                color: DEFAULT_COVER_COLOR.to_string(),
                caption: "Weeknights".to_string(),
            }
        );

        cookbook.cover_image_url = Some("https://img.example/cover.jpg".to_string());
        assert_eq!(
            cookbook.cover(),
            Cover::Image {
                url: "https://img.example/cover.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse(" easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("expert"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::parse(d.as_str()), Some(*d));
        }
    }

    #[test]
    fn test_principal_from_option() {
        let id = Uuid::new_v4();
        assert_eq!(Principal::from(Some(id)), Principal::User(id));
        assert_eq!(Principal::from(None), Principal::Anonymous);
        assert!(Principal::User(id).is(id));
        assert!(!Principal::Anonymous.is(id));
    }
}
