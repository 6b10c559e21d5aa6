//! Cookbook membership and saved-recipe bookmarks.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::types::{
    Cookbook, CookbookRecipeLink, CookbookUpdate, MembershipToggle, Principal, SaveToggle,
    SavedRecipe,
};
use crate::store::EntityStore;
use crate::validation::{validate_color, MAX_NAME_LEN};
use crate::visibility::{require_owned_cookbook, require_owned_recipe, require_viewable_recipe};

fn validate_cookbook_name(raw: &str) -> EngineResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(EngineError::invalid("Cookbook name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(EngineError::invalid(format!(
            "Cookbook name cannot be longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Create a private cookbook whose cover is a neutral swatch captioned with
/// its name.
pub fn create_cookbook(store: &dyn EntityStore, actor: Uuid, name: &str) -> EngineResult<Cookbook> {
    let name = validate_cookbook_name(name)?;
    let cookbook = Cookbook::named(actor, name, Utc::now());
    store.insert_cookbook(&cookbook)?;

    tracing::info!(cookbook_id = %cookbook.id, owner_id = %actor, "cookbook created");
    Ok(cookbook)
}

/// Apply a partial edit to an active cookbook.
pub fn update_cookbook(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
    update: CookbookUpdate,
) -> EngineResult<Cookbook> {
    let mut cookbook = require_owned_cookbook(store, actor, id)?;
    if cookbook.is_deleted() {
        return Err(EngineError::invalid(
            "Cookbook is in the trash; restore it first",
        ));
    }

    if let Some(name) = update.name {
        cookbook.name = validate_cookbook_name(&name)?;
    }
    if let Some(description) = update.description {
        let description = description.trim();
        cookbook.description = (!description.is_empty()).then(|| description.to_string());
    }
    if let Some(is_public) = update.is_public {
        cookbook.is_public = is_public;
    }
    if let Some(url) = update.cover_image_url {
        let url = url.trim();
        cookbook.cover_image_url = (!url.is_empty()).then(|| url.to_string());
    }
    if let Some(color) = update.cover_color {
        cookbook.cover_color = validate_color(&color)?;
    }
    if let Some(caption) = update.cover_caption {
        cookbook.cover_caption = caption.trim().to_string();
    }

    cookbook.updated_at = Utc::now();
    if !store.update_cookbook(&cookbook)? {
        return Err(EngineError::NotFound);
    }

    tracing::info!(cookbook_id = %cookbook.id, owner_id = %actor, "cookbook updated");
    Ok(cookbook)
}

/// Add a recipe to a cookbook, or remove it if it is already there.
///
/// Both must belong to `actor`; other users' recipes have to be cloned first.
/// Removal works even when either side sits in the trash.
pub fn toggle_cookbook_membership(
    store: &dyn EntityStore,
    actor: Uuid,
    cookbook_id: Uuid,
    recipe_id: Uuid,
) -> EngineResult<MembershipToggle> {
    let cookbook = require_owned_cookbook(store, actor, cookbook_id)?;
    let recipe = require_owned_recipe(store, actor, recipe_id)?;

    if store.delete_cookbook_link(cookbook.id, recipe.id)? {
        tracing::info!(cookbook_id = %cookbook.id, recipe_id = %recipe.id, "recipe removed from cookbook");
        return Ok(MembershipToggle::Removed);
    }

    if cookbook.is_deleted() || recipe.is_deleted() {
        return Err(EngineError::invalid(
            "Items in the trash cannot be added to a cookbook",
        ));
    }

    let link = CookbookRecipeLink {
        cookbook_id: cookbook.id,
        recipe_id: recipe.id,
        added_at: Utc::now(),
    };
    // A concurrent toggle may have inserted the same pair; either way it's there now.
    store.insert_cookbook_link(&link)?;

    tracing::info!(cookbook_id = %cookbook.id, recipe_id = %recipe.id, "recipe added to cookbook");
    Ok(MembershipToggle::Added)
}

/// Bookmark a recipe the actor can see, or drop an existing bookmark.
///
/// Dropping a bookmark never needs the target to be visible.
pub fn toggle_save(store: &dyn EntityStore, actor: Uuid, recipe_id: Uuid) -> EngineResult<SaveToggle> {
    if store.delete_saved(actor, recipe_id)? {
        tracing::info!(recipe_id = %recipe_id, user_id = %actor, "recipe unsaved");
        return Ok(SaveToggle::Unsaved);
    }

    let recipe = require_viewable_recipe(store, &Principal::User(actor), recipe_id)?;
    if recipe.is_deleted() {
        return Err(EngineError::NotFound);
    }

    let saved = SavedRecipe {
        user_id: actor,
        recipe_id: recipe.id,
        saved_at: Utc::now(),
    };
    store.insert_saved(&saved)?;

    tracing::info!(recipe_id = %recipe.id, user_id = %actor, "recipe saved");
    Ok(SaveToggle::Saved)
}
