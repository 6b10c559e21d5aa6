use chrono::{DateTime, Utc};
use diesel::prelude::*;
use potluck_core::{Cookbook, CookbookRecipeLink, Difficulty, Profile, Recipe, SavedRecipe};
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct RecipeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub ingredients: Vec<Option<String>>,
    pub steps: Vec<Option<String>>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub category: String,
    pub difficulty: String,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub rating: Option<i16>,
    pub is_favorite: bool,
    pub is_component: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Recipe> for RecipeRow {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            owner_id: recipe.owner_id,
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.iter().cloned().map(Some).collect(),
            steps: recipe.steps.iter().cloned().map(Some).collect(),
            image_url: recipe.image_url.clone(),
            source_url: recipe.source_url.clone(),
            category: recipe.category.clone(),
            difficulty: recipe.difficulty.as_str().to_string(),
            prep_minutes: recipe.prep_minutes,
            cook_minutes: recipe.cook_minutes,
            servings: recipe.servings,
            rating: recipe.rating,
            is_favorite: recipe.is_favorite,
            is_component: recipe.is_component,
            is_public: recipe.is_public,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
            deleted_at: recipe.deleted_at,
        }
    }
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            ingredients: row.ingredients.into_iter().flatten().collect(),
            steps: row.steps.into_iter().flatten().collect(),
            image_url: row.image_url,
            source_url: row.source_url,
            category: row.category,
            // The column is CHECK-constrained, so the fallback never fires in practice.
            difficulty: Difficulty::parse(&row.difficulty).unwrap_or_default(),
            prep_minutes: row.prep_minutes,
            cook_minutes: row.cook_minutes,
            servings: row.servings,
            rating: row.rating,
            is_favorite: row.is_favorite,
            is_component: row.is_component,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = crate::schema::cookbooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct CookbookRow {
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

impl From<&Cookbook> for CookbookRow {
    fn from(cookbook: &Cookbook) -> Self {
        Self {
            id: cookbook.id,
            owner_id: cookbook.owner_id,
            name: cookbook.name.clone(),
            description: cookbook.description.clone(),
            is_public: cookbook.is_public,
            cover_image_url: cookbook.cover_image_url.clone(),
            cover_color: cookbook.cover_color.clone(),
            cover_caption: cookbook.cover_caption.clone(),
            created_at: cookbook.created_at,
            updated_at: cookbook.updated_at,
            deleted_at: cookbook.deleted_at,
        }
    }
}

impl From<CookbookRow> for Cookbook {
    fn from(row: CookbookRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            is_public: row.is_public,
            cover_image_url: row.cover_image_url,
            cover_color: row.cover_color,
            cover_caption: row.cover_caption,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::component_links)]
pub struct NewComponentLink {
    pub parent_id: Uuid,
    pub component_id: Uuid,
    pub position: i32,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::cookbook_recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CookbookRecipeRow {
    pub cookbook_id: Uuid,
    pub recipe_id: Uuid,
    pub added_at: DateTime<Utc>,
}

impl From<CookbookRecipeRow> for CookbookRecipeLink {
    fn from(row: CookbookRecipeRow) -> Self {
        Self {
            cookbook_id: row.cookbook_id,
            recipe_id: row.recipe_id,
            added_at: row.added_at,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::saved_recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedRecipeRow {
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

impl From<SavedRecipeRow> for SavedRecipe {
    fn from(row: SavedRecipeRow) -> Self {
        Self {
            user_id: row.user_id,
            recipe_id: row.recipe_id,
            saved_at: row.saved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        let now = Utc::now();
        Recipe {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Shakshuka".to_string(),
            ingredients: vec!["eggs".to_string(), "tomatoes".to_string()],
            steps: vec!["simmer".to_string()],
            image_url: None,
            source_url: Some("https://example.com/shakshuka".to_string()),
            category: "Breakfast".to_string(),
            difficulty: Difficulty::Easy,
            prep_minutes: Some(10),
            cook_minutes: Some(20),
            servings: Some(2),
            rating: Some(4),
            is_favorite: true,
            is_component: false,
            is_public: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_recipe_row_conversion_preserves_fields() {
        let original = recipe();
        let row = RecipeRow::from(&original);
        assert_eq!(row.difficulty, "easy");
        assert_eq!(Recipe::from(row), original);
    }

    #[test]
    fn test_null_array_elements_are_dropped() {
        let mut row = RecipeRow::from(&recipe());
        row.ingredients = vec![Some("eggs".to_string()), None];
        assert_eq!(Recipe::from(row).ingredients, vec!["eggs"]);
    }
}
