//! Recipe and cookbook lifecycle.
//!
//! ```text
//!            publish               soft_delete
//!  Private ----------> Public ------------------> Deleted --hard_delete--> (gone)
//!     ^  <----------     |                          |
//!     |    unpublish     |                          |
//!     +------------------+------- restore ----------+
//! ```
//!
//! Restore always lands in Private. Cookbooks follow the same Active/Deleted
//! half of the table.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::store::{EntityStore, RecipeFilter};
use crate::types::{Cookbook, Principal, Recipe, RecipeDraft, RecipeState};
use crate::validation::validate_draft;
use crate::visibility::{
    require_active_owned_recipe, require_owned_cookbook, require_owned_recipe,
    require_viewable_recipe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Publish,
    Unpublish,
    SoftDelete,
    Restore,
    HardDelete,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Publish => "publish",
            Transition::Unpublish => "unpublish",
            Transition::SoftDelete => "soft_delete",
            Transition::Restore => "restore",
            Transition::HardDelete => "hard_delete",
        }
    }

    /// Target state for a transition, `Ok(None)` when the record leaves the
    /// store for good. Publish and unpublish are idempotent.
    pub fn apply(self, from: RecipeState) -> EngineResult<Option<RecipeState>> {
        use RecipeState::*;
        match (self, from) {
            (Transition::Publish, Private | Public) => Ok(Some(Public)),
            (Transition::Unpublish, Private | Public) => Ok(Some(Private)),
            (Transition::SoftDelete, Private | Public) => Ok(Some(Deleted)),
            (Transition::Restore, Deleted) => Ok(Some(Private)),
            (Transition::HardDelete, Deleted) => Ok(None),
            (Transition::Publish | Transition::Unpublish, Deleted) => Err(EngineError::invalid(
                "Recipe is in the trash; restore it first",
            )),
            (Transition::SoftDelete, Deleted) => {
                Err(EngineError::invalid("Already in the trash"))
            }
            (Transition::Restore, Private | Public) => {
                Err(EngineError::invalid("Only items in the trash can be restored"))
            }
            (Transition::HardDelete, Private | Public) => Err(EngineError::invalid(
                "Move it to the trash before deleting it permanently",
            )),
        }
    }
}

fn cookbook_state(cookbook: &Cookbook) -> RecipeState {
    if cookbook.is_deleted() {
        RecipeState::Deleted
    } else if cookbook.is_public {
        RecipeState::Public
    } else {
        RecipeState::Private
    }
}

fn save_recipe(store: &dyn EntityStore, recipe: &Recipe) -> EngineResult<()> {
    if store.update_recipe(recipe)? {
        Ok(())
    } else {
        Err(EngineError::NotFound)
    }
}

/// Apply a state-only transition to an owned recipe and persist it.
fn transition_recipe(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
    transition: Transition,
) -> EngineResult<Recipe> {
    let mut recipe = require_owned_recipe(store, actor, id)?;
    let Some(target) = transition.apply(recipe.state())? else {
        return Err(EngineError::invalid("Transition removes the recipe"));
    };

    let now = Utc::now();
    match target {
        RecipeState::Public => {
            recipe.is_public = true;
        }
        RecipeState::Private => {
            recipe.is_public = false;
            recipe.deleted_at = None;
        }
        RecipeState::Deleted => {
            recipe.deleted_at = Some(now);
        }
    }
    recipe.updated_at = now;
    save_recipe(store, &recipe)?;

    tracing::info!(
        recipe_id = %recipe.id,
        owner_id = %actor,
        transition = transition.as_str(),
        "recipe transition applied"
    );
    Ok(recipe)
}

/// Create a recipe owned by `actor`. Private unless the draft asks otherwise.
pub fn create_recipe(
    store: &dyn EntityStore,
    actor: Uuid,
    draft: RecipeDraft,
) -> EngineResult<Recipe> {
    let draft = validate_draft(draft)?;
    let recipe = Recipe::from_draft(actor, draft, Utc::now());
    store.insert_recipe(&recipe)?;

    tracing::info!(
        recipe_id = %recipe.id,
        owner_id = %actor,
        is_component = recipe.is_component,
        is_public = recipe.is_public,
        "recipe created"
    );
    Ok(recipe)
}

/// Replace the editable content of an active recipe.
///
/// A recipe that is used as a component cannot stop being one while any
/// parent still links to it. The link check runs inside the store's write,
/// serialized with component list changes.
pub fn update_recipe(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
    draft: RecipeDraft,
) -> EngineResult<Recipe> {
    let mut recipe = require_active_owned_recipe(store, actor, id)?;
    let draft = validate_draft(draft)?;

    recipe.apply_draft(draft, Utc::now());
    let updated = store.update_recipe_checked(&recipe, &|graph| {
        let parents = graph.parents(recipe.id).count();
        if !recipe.is_component && parents > 0 {
            return Err(format!(
                "Recipe is used as a component by {parents} other recipe(s); remove it from them first"
            ));
        }
        Ok(())
    })?;
    if !updated {
        return Err(EngineError::NotFound);
    }

    tracing::info!(recipe_id = %recipe.id, owner_id = %actor, "recipe updated");
    Ok(recipe)
}

/// Make a standalone recipe public.
///
/// Component recipes are shared through the dishes that include them, so
/// they cannot be published from this flow.
pub fn publish_recipe(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<Recipe> {
    let recipe = require_owned_recipe(store, actor, id)?;
    if recipe.is_component && !recipe.is_deleted() {
        return Err(EngineError::invalid(
            "Component recipes are shared through the recipes that include them",
        ));
    }
    transition_recipe(store, actor, id, Transition::Publish)
}

/// Make a recipe private. Other users' bookmarks stop resolving immediately;
/// the bookmark rows themselves are left alone.
pub fn unpublish_recipe(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<Recipe> {
    transition_recipe(store, actor, id, Transition::Unpublish)
}

/// Move a recipe to the trash. All links survive until restore or purge.
pub fn soft_delete_recipe(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<Recipe> {
    transition_recipe(store, actor, id, Transition::SoftDelete)
}

/// Bring a recipe back from the trash, always as private.
pub fn restore_recipe(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<Recipe> {
    transition_recipe(store, actor, id, Transition::Restore)
}

/// Permanently delete a trashed recipe and every link or bookmark to it.
pub fn hard_delete_recipe(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<()> {
    let recipe = require_owned_recipe(store, actor, id)?;
    Transition::HardDelete.apply(recipe.state())?;

    if !store.purge_recipe(recipe.id)? {
        return Err(EngineError::NotFound);
    }

    tracing::info!(recipe_id = %recipe.id, owner_id = %actor, "recipe permanently deleted");
    Ok(())
}

/// Permanently delete everything in the actor's recipe trash.
pub fn empty_trash(store: &dyn EntityStore, actor: Uuid) -> EngineResult<usize> {
    let trashed = store.recipes(&RecipeFilter::owned_by(actor).trashed())?;
    let mut purged = 0;
    for recipe in trashed {
        if store.purge_recipe(recipe.id)? {
            purged += 1;
        }
    }

    tracing::info!(owner_id = %actor, purged, "trash emptied");
    Ok(purged)
}

pub fn set_favorite(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
    favorite: bool,
) -> EngineResult<Recipe> {
    let mut recipe = require_active_owned_recipe(store, actor, id)?;
    if recipe.is_component {
        return Err(EngineError::invalid(
            "Component recipes cannot be marked as favorites",
        ));
    }
    recipe.is_favorite = favorite;
    recipe.updated_at = Utc::now();
    save_recipe(store, &recipe)?;
    Ok(recipe)
}

/// Copy a recipe the actor can see into the actor's own collection.
///
/// The copy is always private, keeps `is_component`, and starts with no
/// component links since the source's components belong to someone else.
pub fn clone_recipe(store: &dyn EntityStore, actor: Uuid, source_id: Uuid) -> EngineResult<Recipe> {
    let source = require_viewable_recipe(store, &Principal::User(actor), source_id)?;
    if source.is_deleted() {
        return Err(EngineError::NotFound);
    }

    let now = Utc::now();
    let mut copy = Recipe {
        id: Uuid::new_v4(),
        owner_id: actor,
        is_public: false,
        created_at: now,
        updated_at: now,
        deleted_at: None,
        ..source
    };
    copy.enforce_component_invariant();
    store.insert_recipe(&copy)?;

    tracing::info!(
        recipe_id = %copy.id,
        source_id = %source_id,
        owner_id = %actor,
        "recipe cloned"
    );
    Ok(copy)
}

fn transition_cookbook(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
    transition: Transition,
) -> EngineResult<Cookbook> {
    let mut cookbook = require_owned_cookbook(store, actor, id)?;
    let Some(target) = transition.apply(cookbook_state(&cookbook))? else {
        return Err(EngineError::invalid("Transition removes the cookbook"));
    };

    let now = Utc::now();
    match target {
        RecipeState::Public => cookbook.is_public = true,
        RecipeState::Private => {
            cookbook.is_public = false;
            cookbook.deleted_at = None;
        }
        RecipeState::Deleted => cookbook.deleted_at = Some(now),
    }
    cookbook.updated_at = now;
    if !store.update_cookbook(&cookbook)? {
        return Err(EngineError::NotFound);
    }

    tracing::info!(
        cookbook_id = %cookbook.id,
        owner_id = %actor,
        transition = transition.as_str(),
        "cookbook transition applied"
    );
    Ok(cookbook)
}

/// Move a cookbook to the trash. Membership links stay until purge.
pub fn soft_delete_cookbook(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
) -> EngineResult<Cookbook> {
    transition_cookbook(store, actor, id, Transition::SoftDelete)
}

pub fn restore_cookbook(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<Cookbook> {
    transition_cookbook(store, actor, id, Transition::Restore)
}

/// Permanently delete a trashed cookbook and its membership links. Member
/// recipes are never touched.
pub fn purge_cookbook(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<()> {
    let cookbook = require_owned_cookbook(store, actor, id)?;
    Transition::HardDelete.apply(cookbook_state(&cookbook))?;

    if !store.purge_cookbook(cookbook.id)? {
        return Err(EngineError::NotFound);
    }

    tracing::info!(cookbook_id = %cookbook.id, owner_id = %actor, "cookbook permanently deleted");
    Ok(())
}
