//! Read paths. Every listing goes through the visibility resolver.

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::profiles::get_profile_by_username;
use crate::store::{deleted_order, CookbookFilter, EntityStore, RecipeFilter};
use crate::types::{Cookbook, Principal, Recipe, SavedEntry};
use crate::visibility::{
    can_view_cookbook, can_view_recipe, filter_viewable, require_owned_recipe,
    require_viewable_cookbook, require_viewable_recipe,
};

/// Narrowing for the owner's own recipe list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnRecipeQuery {
    /// `Some(true)` for components only, `Some(false)` for dishes only.
    pub components: Option<bool>,
    pub favorites_only: bool,
}

pub fn get_recipe(store: &dyn EntityStore, principal: &Principal, id: Uuid) -> EngineResult<Recipe> {
    require_viewable_recipe(store, principal, id)
}

pub fn get_cookbook(
    store: &dyn EntityStore,
    principal: &Principal,
    id: Uuid,
) -> EngineResult<Cookbook> {
    require_viewable_cookbook(store, principal, id)
}

pub fn list_own_recipes(
    store: &dyn EntityStore,
    actor: Uuid,
    query: OwnRecipeQuery,
) -> EngineResult<Vec<Recipe>> {
    let mut filter = RecipeFilter::owned_by(actor).active();
    if let Some(components) = query.components {
        filter = filter.components(components);
    }
    if query.favorites_only {
        filter = filter.favorites();
    }
    Ok(store.recipes(&filter)?)
}

/// Recipes in the actor's trash, most recently deleted first.
pub fn list_trash(store: &dyn EntityStore, actor: Uuid) -> EngineResult<Vec<Recipe>> {
    let mut trashed = store.recipes(&RecipeFilter::owned_by(actor).trashed())?;
    trashed.sort_by(|a, b| deleted_order(a.deleted_at, b.deleted_at));
    Ok(trashed)
}

pub fn list_cookbook_trash(store: &dyn EntityStore, actor: Uuid) -> EngineResult<Vec<Cookbook>> {
    let mut trashed = store.cookbooks(&CookbookFilter::owned_by(actor).trashed())?;
    trashed.sort_by(|a, b| deleted_order(a.deleted_at, b.deleted_at));
    Ok(trashed)
}

/// A profile page: active standalone dishes the principal may see.
/// Components never appear here even when reachable through a public dish.
pub fn list_profile_recipes(
    store: &dyn EntityStore,
    principal: &Principal,
    username: &str,
) -> EngineResult<Vec<Recipe>> {
    let profile = get_profile_by_username(store, username)?;
    let mut filter = RecipeFilter::owned_by(profile.id).active().components(false);
    if !principal.is(profile.id) {
        filter = filter.public(true);
    }
    filter_viewable(store, principal, store.recipes(&filter)?)
}

pub fn list_profile_cookbooks(
    store: &dyn EntityStore,
    principal: &Principal,
    username: &str,
) -> EngineResult<Vec<Cookbook>> {
    let profile = get_profile_by_username(store, username)?;
    let mut filter = CookbookFilter::owned_by(profile.id).active();
    if !principal.is(profile.id) {
        filter = filter.public(true);
    }
    Ok(store.cookbooks(&filter)?)
}

pub fn list_cookbooks(store: &dyn EntityStore, actor: Uuid) -> EngineResult<Vec<Cookbook>> {
    Ok(store.cookbooks(&CookbookFilter::owned_by(actor).active())?)
}

/// Members of a cookbook in the order they were added. A public cookbook
/// never reveals a member that is not visible on its own.
pub fn list_cookbook_recipes(
    store: &dyn EntityStore,
    principal: &Principal,
    cookbook_id: Uuid,
) -> EngineResult<Vec<Recipe>> {
    let cookbook = require_viewable_cookbook(store, principal, cookbook_id)?;
    let order: Vec<Uuid> = store
        .cookbook_links(cookbook.id)?
        .into_iter()
        .map(|l| l.recipe_id)
        .collect();
    let members = store.recipes(&RecipeFilter::with_ids(order.clone()).active())?;

    let mut out = Vec::with_capacity(members.len());
    for id in order {
        if let Some(recipe) = members.iter().find(|r| r.id == id) {
            if can_view_recipe(store, principal, recipe)? {
                out.push(recipe.clone());
            }
        }
    }
    Ok(out)
}

/// The actor's cookbooks that currently hold `recipe_id`.
pub fn cookbooks_containing(
    store: &dyn EntityStore,
    actor: Uuid,
    recipe_id: Uuid,
) -> EngineResult<Vec<Cookbook>> {
    let recipe = require_owned_recipe(store, actor, recipe_id)?;
    let ids = store.cookbooks_with_recipe(recipe.id)?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let principal = Principal::User(actor);
    Ok(store
        .cookbooks(&CookbookFilter::owned_by(actor).restrict_to(ids).active())?
        .into_iter()
        .filter(|c| can_view_cookbook(&principal, c))
        .collect())
}

/// Bookmarks whose target is still active and visible to the actor, newest
/// first. Hidden entries are skipped and left in place, so they come back
/// if the target is republished.
pub fn list_saved(store: &dyn EntityStore, actor: Uuid) -> EngineResult<Vec<SavedEntry>> {
    let saved = store.saved_recipes(actor)?;
    if saved.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = saved.iter().map(|s| s.recipe_id).collect();
    let targets = store.recipes(&RecipeFilter::with_ids(ids).active())?;
    let principal = Principal::User(actor);

    let mut entries = Vec::with_capacity(saved.len());
    for bookmark in saved {
        let Some(recipe) = targets.iter().find(|r| r.id == bookmark.recipe_id) else {
            continue;
        };
        if can_view_recipe(store, &principal, recipe)? {
            entries.push(SavedEntry {
                recipe: recipe.clone(),
                saved_at: bookmark.saved_at,
            });
        }
    }
    Ok(entries)
}

/// Whether the actor has a bookmark that currently resolves.
pub fn is_saved(store: &dyn EntityStore, actor: Uuid, recipe_id: Uuid) -> EngineResult<bool> {
    if store.saved_recipe(actor, recipe_id)?.is_none() {
        return Ok(false);
    }
    match require_viewable_recipe(store, &Principal::User(actor), recipe_id) {
        Ok(recipe) => Ok(!recipe.is_deleted()),
        Err(EngineError::NotFound) => Ok(false),
        Err(err) => Err(err),
    }
}
