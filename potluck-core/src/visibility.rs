//! Visibility resolver.
//!
//! The single place that decides who may see or change a recipe or cookbook.
//! Rules, in order:
//!
//! 1. The owner may always view and mutate, deleted or not.
//! 2. Deleted entities are invisible to everyone else.
//! 3. A public recipe is visible to anyone, anonymous included.
//! 4. A private component recipe is visible when some active public recipe
//!    reaches it through the component graph. The whole ancestor closure is
//!    walked, not only direct parents.
//! 5. A public cookbook exposes only members that are visible on their own.
//! 6. Only the owner may mutate.
//!
//! Any failed check surfaces as [`EngineError::NotFound`].

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::store::{EntityStore, RecipeFilter};
use crate::types::{Cookbook, Principal, Recipe};

/// Why a principal can see a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Owner,
    Public,
    /// Reached through a public recipe that includes it.
    Derived,
    Denied,
}

impl Access {
    pub fn is_granted(self) -> bool {
        !matches!(self, Access::Denied)
    }
}

/// Rules 1-3. `None` means only the composition graph can decide.
pub fn direct_recipe_access(principal: &Principal, recipe: &Recipe) -> Option<Access> {
    if principal.is(recipe.owner_id) {
        return Some(Access::Owner);
    }
    if recipe.is_deleted() {
        return Some(Access::Denied);
    }
    if recipe.is_public {
        return Some(Access::Public);
    }
    if recipe.is_component {
        None
    } else {
        Some(Access::Denied)
    }
}

/// Full evaluation of rules 1-4 for a recipe.
pub fn recipe_access(
    store: &dyn EntityStore,
    principal: &Principal,
    recipe: &Recipe,
) -> EngineResult<Access> {
    if let Some(access) = direct_recipe_access(principal, recipe) {
        return Ok(access);
    }
    if has_public_ancestor(store, recipe)? {
        Ok(Access::Derived)
    } else {
        Ok(Access::Denied)
    }
}

pub fn can_view_recipe(
    store: &dyn EntityStore,
    principal: &Principal,
    recipe: &Recipe,
) -> EngineResult<bool> {
    Ok(recipe_access(store, principal, recipe)?.is_granted())
}

pub fn can_mutate_recipe(principal: &Principal, recipe: &Recipe) -> bool {
    principal.is(recipe.owner_id)
}

/// Cookbooks have no derived access: owner, or active and public.
pub fn can_view_cookbook(principal: &Principal, cookbook: &Cookbook) -> bool {
    principal.is(cookbook.owner_id) || (!cookbook.is_deleted() && cookbook.is_public)
}

pub fn can_mutate_cookbook(principal: &Principal, cookbook: &Cookbook) -> bool {
    principal.is(cookbook.owner_id)
}

/// Walk upward from `component` through active parents owned by the same
/// user, stopping at the first public one.
///
/// A deleted recipe breaks the chain: it is invisible itself, so nothing can
/// be reached through it.
pub fn has_public_ancestor(store: &dyn EntityStore, component: &Recipe) -> EngineResult<bool> {
    let mut seen: HashSet<Uuid> = HashSet::from([component.id]);
    let mut frontier = vec![component.id];

    while let Some(id) = frontier.pop() {
        let parent_ids: Vec<Uuid> = store
            .parent_ids(id)?
            .into_iter()
            .filter(|parent_id| seen.insert(*parent_id))
            .collect();
        if parent_ids.is_empty() {
            continue;
        }

        let parents = store.recipes(&RecipeFilter::with_ids(parent_ids).active())?;
        for parent in parents {
            if parent.owner_id != component.owner_id {
                continue;
            }
            if parent.is_public {
                tracing::trace!(
                    recipe_id = %component.id,
                    via = %parent.id,
                    "derived visibility through public ancestor"
                );
                return Ok(true);
            }
            frontier.push(parent.id);
        }
    }

    Ok(false)
}

/// Keep only the recipes the principal can see, preserving order.
pub fn filter_viewable(
    store: &dyn EntityStore,
    principal: &Principal,
    recipes: Vec<Recipe>,
) -> EngineResult<Vec<Recipe>> {
    let mut visible = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if can_view_recipe(store, principal, &recipe)? {
            visible.push(recipe);
        }
    }
    Ok(visible)
}

/// Load a recipe the principal may view, or `NotFound`.
pub fn require_viewable_recipe(
    store: &dyn EntityStore,
    principal: &Principal,
    id: Uuid,
) -> EngineResult<Recipe> {
    let recipe = store.recipe(id)?.ok_or(EngineError::NotFound)?;
    if can_view_recipe(store, principal, &recipe)? {
        Ok(recipe)
    } else {
        tracing::debug!(recipe_id = %id, "recipe hidden from principal");
        Err(EngineError::NotFound)
    }
}

/// Load a recipe the actor owns, or `NotFound`. Deleted recipes are returned.
pub fn require_owned_recipe(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> EngineResult<Recipe> {
    let recipe = store.recipe(id)?.ok_or(EngineError::NotFound)?;
    if can_mutate_recipe(&Principal::User(actor), &recipe) {
        Ok(recipe)
    } else {
        tracing::debug!(recipe_id = %id, actor = %actor, "mutation by non-owner refused");
        Err(EngineError::NotFound)
    }
}

/// Like [`require_owned_recipe`] but refuses recipes sitting in the trash.
pub fn require_active_owned_recipe(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
) -> EngineResult<Recipe> {
    let recipe = require_owned_recipe(store, actor, id)?;
    if recipe.is_deleted() {
        return Err(EngineError::invalid(
            "Recipe is in the trash; restore it first",
        ));
    }
    Ok(recipe)
}

pub fn require_viewable_cookbook(
    store: &dyn EntityStore,
    principal: &Principal,
    id: Uuid,
) -> EngineResult<Cookbook> {
    let cookbook = store.cookbook(id)?.ok_or(EngineError::NotFound)?;
    if can_view_cookbook(principal, &cookbook) {
        Ok(cookbook)
    } else {
        Err(EngineError::NotFound)
    }
}

pub fn require_owned_cookbook(
    store: &dyn EntityStore,
    actor: Uuid,
    id: Uuid,
) -> EngineResult<Cookbook> {
    let cookbook = store.cookbook(id)?.ok_or(EngineError::NotFound)?;
    if can_mutate_cookbook(&Principal::User(actor), &cookbook) {
        Ok(cookbook)
    } else {
        Err(EngineError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::RecipeDraft;
    use chrono::Utc;

    fn recipe(owner: Uuid, is_component: bool, is_public: bool) -> Recipe {
        let draft = RecipeDraft {
            name: "Dough".to_string(),
            ingredients: vec!["flour".to_string()],
            steps: vec!["knead".to_string()],
            is_component,
            is_public,
            ..Default::default()
        };
        Recipe::from_draft(owner, draft, Utc::now())
    }

    #[test]
    fn test_owner_sees_deleted() {
        let owner = Uuid::new_v4();
        let mut r = recipe(owner, false, true);
        r.deleted_at = Some(Utc::now());

        assert_eq!(
            direct_recipe_access(&Principal::User(owner), &r),
            Some(Access::Owner)
        );
        assert_eq!(
            direct_recipe_access(&Principal::Anonymous, &r),
            Some(Access::Denied)
        );
    }

    #[test]
    fn test_public_visible_to_anonymous() {
        let r = recipe(Uuid::new_v4(), false, true);
        assert_eq!(
            direct_recipe_access(&Principal::Anonymous, &r),
            Some(Access::Public)
        );
    }

    #[test]
    fn test_private_dish_denied_without_graph_lookup() {
        let r = recipe(Uuid::new_v4(), false, false);
        assert_eq!(
            direct_recipe_access(&Principal::User(Uuid::new_v4()), &r),
            Some(Access::Denied)
        );
    }

    #[test]
    fn test_private_component_needs_graph() {
        let r = recipe(Uuid::new_v4(), true, false);
        assert_eq!(direct_recipe_access(&Principal::Anonymous, &r), None);
    }

    #[test]
    fn test_deleted_parent_breaks_chain() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let mut parent = recipe(owner, false, true);
        let child = recipe(owner, true, false);
        parent.deleted_at = Some(Utc::now());
        store.insert_recipe(&parent).unwrap();
        store.insert_recipe(&child).unwrap();
        store.replace_components(parent.id, &[child.id]).unwrap();

        assert_eq!(
            recipe_access(&store, &Principal::Anonymous, &child).unwrap(),
            Access::Denied
        );
    }

    #[test]
    fn test_cycle_in_graph_terminates() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let a = recipe(owner, true, false);
        let b = recipe(owner, true, false);
        store.insert_recipe(&a).unwrap();
        store.insert_recipe(&b).unwrap();
        // Bypass the composition guard to simulate corrupted data
        store.replace_components(a.id, &[b.id]).unwrap();
        store.replace_components(b.id, &[a.id]).unwrap();

        assert!(!has_public_ancestor(&store, &a).unwrap());
    }

    #[test]
    fn test_cookbook_visibility() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let mut cookbook = Cookbook::named(owner, "Baking".to_string(), now);

        assert!(can_view_cookbook(&Principal::User(owner), &cookbook));
        assert!(!can_view_cookbook(&Principal::Anonymous, &cookbook));

        cookbook.is_public = true;
        assert!(can_view_cookbook(&Principal::Anonymous, &cookbook));
        assert!(!can_mutate_cookbook(&Principal::Anonymous, &cookbook));

        cookbook.deleted_at = Some(now);
        assert!(!can_view_cookbook(&Principal::Anonymous, &cookbook));
        assert!(can_view_cookbook(&Principal::User(owner), &cookbook));
    }
}
