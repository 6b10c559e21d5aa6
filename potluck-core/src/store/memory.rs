//! In-memory entity store for tests and embedding.
//!
//! Every method takes the table lock once, so multi-row writes are atomic
//! with respect to other callers.

use super::{
    CookbookFilter, EntityStore, GraphCheck, OwnerGraph, RecipeFilter, StoreError, StoreResult,
};
use crate::types::{ComponentLink, Cookbook, CookbookRecipeLink, Profile, Recipe, SavedRecipe};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    recipes: HashMap<Uuid, Recipe>,
    /// Kept in insertion order so children come back in display order.
    components: Vec<ComponentLink>,
    cookbooks: HashMap<Uuid, Cookbook>,
    cookbook_links: Vec<CookbookRecipeLink>,
    saved: Vec<SavedRecipe>,
    profiles: HashMap<Uuid, Profile>,
}

impl Tables {
    fn owner_graph(&self, owner_id: Uuid) -> OwnerGraph {
        let owned: Vec<Recipe> = self
            .recipes
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        let links = self
            .components
            .iter()
            .filter(|l| owned.iter().any(|r| r.id == l.parent_id))
            .copied()
            .collect();
        OwnerGraph::new(owned, links)
    }

    fn set_children(&mut self, parent_id: Uuid, component_ids: &[Uuid]) {
        self.components.retain(|l| l.parent_id != parent_id);
        self.components
            .extend(component_ids.iter().map(|&component_id| ComponentLink {
                parent_id,
                component_id,
            }));
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Every component link currently stored.
    pub fn component_links(&self) -> StoreResult<Vec<ComponentLink>> {
        Ok(self.read()?.components.clone())
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.check_online()?;
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.check_online()?;
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl EntityStore for MemoryStore {
    fn recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        Ok(self.read()?.recipes.get(&id).cloned())
    }

    fn recipes(&self, filter: &RecipeFilter) -> StoreResult<Vec<Recipe>> {
        let tables = self.read()?;
        let mut rows: Vec<Recipe> = tables
            .recipes
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.recipes.contains_key(&recipe.id) {
            return Err(StoreError::Conflict("recipe id already exists".to_string()));
        }
        tables.recipes.insert(recipe.id, recipe.clone());
        Ok(())
    }

    fn update_recipe(&self, recipe: &Recipe) -> StoreResult<bool> {
        let mut tables = self.write()?;
        match tables.recipes.get_mut(&recipe.id) {
            Some(row) => {
                *row = recipe.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn purge_recipe(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let tombstoned = tables.recipes.get(&id).is_some_and(Recipe::is_deleted);
        if !tombstoned {
            return Ok(false);
        }
        tables.recipes.remove(&id);
        tables
            .components
            .retain(|l| l.parent_id != id && l.component_id != id);
        tables.cookbook_links.retain(|l| l.recipe_id != id);
        tables.saved.retain(|s| s.recipe_id != id);
        Ok(true)
    }

    fn component_ids(&self, parent_id: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .components
            .iter()
            .filter(|l| l.parent_id == parent_id)
            .map(|l| l.component_id)
            .collect())
    }

    fn parent_ids(&self, component_id: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .components
            .iter()
            .filter(|l| l.component_id == component_id)
            .map(|l| l.parent_id)
            .collect())
    }

    fn replace_components(&self, parent_id: Uuid, component_ids: &[Uuid]) -> StoreResult<()> {
        self.write()?.set_children(parent_id, component_ids);
        Ok(())
    }

    fn replace_components_checked(
        &self,
        owner_id: Uuid,
        parent_id: Uuid,
        component_ids: &[Uuid],
        check: GraphCheck<'_>,
    ) -> StoreResult<()> {
        let mut tables = self.write()?;
        check(&tables.owner_graph(owner_id)).map_err(StoreError::Rejected)?;
        tables.set_children(parent_id, component_ids);
        Ok(())
    }

    fn update_recipe_checked(&self, recipe: &Recipe, check: GraphCheck<'_>) -> StoreResult<bool> {
        let mut tables = self.write()?;
        if !tables.recipes.contains_key(&recipe.id) {
            return Ok(false);
        }
        check(&tables.owner_graph(recipe.owner_id)).map_err(StoreError::Rejected)?;
        tables.recipes.insert(recipe.id, recipe.clone());
        Ok(true)
    }

    fn cookbook(&self, id: Uuid) -> StoreResult<Option<Cookbook>> {
        Ok(self.read()?.cookbooks.get(&id).cloned())
    }

    fn cookbooks(&self, filter: &CookbookFilter) -> StoreResult<Vec<Cookbook>> {
        let tables = self.read()?;
        let mut rows: Vec<Cookbook> = tables
            .cookbooks
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    fn insert_cookbook(&self, cookbook: &Cookbook) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.cookbooks.contains_key(&cookbook.id) {
            return Err(StoreError::Conflict("cookbook id already exists".to_string()));
        }
        tables.cookbooks.insert(cookbook.id, cookbook.clone());
        Ok(())
    }

    fn update_cookbook(&self, cookbook: &Cookbook) -> StoreResult<bool> {
        let mut tables = self.write()?;
        match tables.cookbooks.get_mut(&cookbook.id) {
            Some(row) => {
                *row = cookbook.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn purge_cookbook(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let tombstoned = tables.cookbooks.get(&id).is_some_and(Cookbook::is_deleted);
        if !tombstoned {
            return Ok(false);
        }
        tables.cookbooks.remove(&id);
        tables.cookbook_links.retain(|l| l.cookbook_id != id);
        Ok(true)
    }

    fn cookbook_links(&self, cookbook_id: Uuid) -> StoreResult<Vec<CookbookRecipeLink>> {
        let tables = self.read()?;
        let mut links: Vec<CookbookRecipeLink> = tables
            .cookbook_links
            .iter()
            .filter(|l| l.cookbook_id == cookbook_id)
            .copied()
            .collect();
        links.sort_by_key(|l| l.added_at);
        Ok(links)
    }

    fn cookbooks_with_recipe(&self, recipe_id: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .cookbook_links
            .iter()
            .filter(|l| l.recipe_id == recipe_id)
            .map(|l| l.cookbook_id)
            .collect())
    }

    fn insert_cookbook_link(&self, link: &CookbookRecipeLink) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let exists = tables
            .cookbook_links
            .iter()
            .any(|l| l.cookbook_id == link.cookbook_id && l.recipe_id == link.recipe_id);
        if exists {
            return Ok(false);
        }
        tables.cookbook_links.push(*link);
        Ok(true)
    }

    fn delete_cookbook_link(&self, cookbook_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let before = tables.cookbook_links.len();
        tables
            .cookbook_links
            .retain(|l| !(l.cookbook_id == cookbook_id && l.recipe_id == recipe_id));
        Ok(tables.cookbook_links.len() < before)
    }

    fn saved_recipes(&self, user_id: Uuid) -> StoreResult<Vec<SavedRecipe>> {
        let tables = self.read()?;
        let mut saved: Vec<SavedRecipe> = tables
            .saved
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .copied()
            .collect();
        saved.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saved)
    }

    fn saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<Option<SavedRecipe>> {
        Ok(self
            .read()?
            .saved
            .iter()
            .find(|s| s.user_id == user_id && s.recipe_id == recipe_id)
            .copied())
    }

    fn insert_saved(&self, saved: &SavedRecipe) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let exists = tables
            .saved
            .iter()
            .any(|s| s.user_id == saved.user_id && s.recipe_id == saved.recipe_id);
        if exists {
            return Ok(false);
        }
        tables.saved.push(*saved);
        Ok(true)
    }

    fn delete_saved(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let before = tables.saved.len();
        tables
            .saved
            .retain(|s| !(s.user_id == user_id && s.recipe_id == recipe_id));
        Ok(tables.saved.len() < before)
    }

    fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        Ok(self.read()?.profiles.get(&id).cloned())
    }

    fn profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        Ok(self
            .read()?
            .profiles
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    fn upsert_profile(&self, profile: &Profile) -> StoreResult<()> {
        let mut tables = self.write()?;
        let taken = tables
            .profiles
            .values()
            .any(|p| p.username == profile.username && p.id != profile.id);
        if taken {
            return Err(StoreError::Conflict("Username already exists".to_string()));
        }
        tables.profiles.insert(profile.id, profile.clone());
        Ok(())
    }
}
