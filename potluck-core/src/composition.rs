//! Component graph: which recipes are built from which sub-recipes.
//!
//! Display (`resolve_includes`, `used_in`) looks one hop away. Access control
//! in [`crate::visibility`] walks the whole closure. The two traversals are
//! intentionally different.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::store::{EntityStore, OwnerGraph, RecipeFilter};
use crate::types::{IncludedRecipe, Principal, Recipe};
use crate::visibility::{
    can_view_recipe, require_active_owned_recipe, require_viewable_recipe,
};

/// Replace the full component list of `parent_id`.
///
/// Every component must be an active component recipe owned by `actor`, and
/// the new edges must not make `parent_id` its own ancestor. Duplicates are
/// collapsed, first occurrence wins. Returns the stored order.
///
/// The component and cycle checks run inside the store's write, against the
/// graph as it is at commit time.
pub fn set_components(
    store: &dyn EntityStore,
    actor: Uuid,
    parent_id: Uuid,
    component_ids: &[Uuid],
) -> EngineResult<Vec<Uuid>> {
    let parent = require_active_owned_recipe(store, actor, parent_id)?;

    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = component_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    if ids.contains(&parent.id) {
        return Err(EngineError::invalid("A recipe cannot include itself"));
    }

    store.replace_components_checked(actor, parent.id, &ids, &|graph| {
        check_components(graph, &parent, &ids)
    })?;

    tracing::info!(
        recipe_id = %parent.id,
        owner_id = %actor,
        components = ids.len(),
        "component list replaced"
    );

    Ok(ids)
}

fn check_components(graph: &OwnerGraph, parent: &Recipe, ids: &[Uuid]) -> Result<(), String> {
    for id in ids {
        let usable = graph
            .recipe(*id)
            .is_some_and(|r| r.is_component && !r.is_deleted());
        if !usable {
            // Same message for missing, foreign and non-component ids.
            return Err(format!("{id} is not one of your component recipes"));
        }
    }

    for id in ids {
        if graph.descendants(*id).contains(&parent.id) {
            let name = graph.recipe(*id).map(|r| r.name.as_str()).unwrap_or_default();
            return Err(format!(
                "\"{name}\" already includes \"{}\"; adding it would create a cycle",
                parent.name
            ));
        }
    }

    Ok(())
}

/// Direct children of a recipe the principal can view, in display order.
///
/// Deleted children are skipped for everyone, the owner included.
pub fn resolve_includes(
    store: &dyn EntityStore,
    principal: &Principal,
    recipe_id: Uuid,
) -> EngineResult<Vec<IncludedRecipe>> {
    let parent = require_viewable_recipe(store, principal, recipe_id)?;
    let child_ids = store.component_ids(parent.id)?;
    let children = store.recipes(&RecipeFilter::with_ids(child_ids.clone()).active())?;
    ordered_visible(store, principal, &child_ids, children)
}

/// Direct parents that use a recipe as a component.
pub fn used_in(
    store: &dyn EntityStore,
    principal: &Principal,
    recipe_id: Uuid,
) -> EngineResult<Vec<IncludedRecipe>> {
    let component = require_viewable_recipe(store, principal, recipe_id)?;
    let parent_ids = store.parent_ids(component.id)?;
    let parents = store.recipes(&RecipeFilter::with_ids(parent_ids.clone()).active())?;
    ordered_visible(store, principal, &parent_ids, parents)
}

fn ordered_visible(
    store: &dyn EntityStore,
    principal: &Principal,
    order: &[Uuid],
    rows: Vec<Recipe>,
) -> EngineResult<Vec<IncludedRecipe>> {
    let mut out = Vec::with_capacity(rows.len());
    for id in order {
        let Some(recipe) = rows.iter().find(|r| r.id == *id) else {
            continue;
        };
        if can_view_recipe(store, principal, recipe)? {
            out.push(IncludedRecipe::from(recipe));
        }
    }
    Ok(out)
}
