//! Graph writes that race each other for the same owner.

mod common;

use std::sync::Mutex;

use common::{draft, Kitchen};
use potluck_core::{
    set_components, update_recipe, Cookbook, CookbookFilter, CookbookRecipeLink, EngineError,
    EntityStore, GraphCheck, MemoryStore, Profile, Recipe, RecipeDraft, RecipeFilter,
    SavedRecipe, StoreResult,
};
use uuid::Uuid;

type Competitor = Box<dyn FnOnce(&MemoryStore) + Send>;

/// Wraps a memory store and lets one competing write commit between the
/// engine's reads and its checked write.
struct RacingStore {
    inner: MemoryStore,
    competitor: Mutex<Option<Competitor>>,
}

impl RacingStore {
    fn new(inner: MemoryStore, competitor: impl FnOnce(&MemoryStore) + Send + 'static) -> Self {
        Self {
            inner,
            competitor: Mutex::new(Some(Box::new(competitor))),
        }
    }

    fn let_competitor_run(&self) {
        let competitor = self.competitor.lock().unwrap().take();
        if let Some(run) = competitor {
            run(&self.inner);
        }
    }
}

impl EntityStore for RacingStore {
    fn recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        self.inner.recipe(id)
    }

    fn recipes(&self, filter: &RecipeFilter) -> StoreResult<Vec<Recipe>> {
        self.inner.recipes(filter)
    }

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()> {
        self.inner.insert_recipe(recipe)
    }

    fn update_recipe(&self, recipe: &Recipe) -> StoreResult<bool> {
        self.inner.update_recipe(recipe)
    }

    fn purge_recipe(&self, id: Uuid) -> StoreResult<bool> {
        self.inner.purge_recipe(id)
    }

    fn component_ids(&self, parent_id: Uuid) -> StoreResult<Vec<Uuid>> {
        self.inner.component_ids(parent_id)
    }

    fn parent_ids(&self, component_id: Uuid) -> StoreResult<Vec<Uuid>> {
        self.inner.parent_ids(component_id)
    }

    fn replace_components(&self, parent_id: Uuid, component_ids: &[Uuid]) -> StoreResult<()> {
        self.inner.replace_components(parent_id, component_ids)
    }

    fn replace_components_checked(
        &self,
        owner_id: Uuid,
        parent_id: Uuid,
        component_ids: &[Uuid],
        check: GraphCheck<'_>,
    ) -> StoreResult<()> {
        self.let_competitor_run();
        self.inner
            .replace_components_checked(owner_id, parent_id, component_ids, check)
    }

    fn update_recipe_checked(&self, recipe: &Recipe, check: GraphCheck<'_>) -> StoreResult<bool> {
        self.let_competitor_run();
        self.inner.update_recipe_checked(recipe, check)
    }

    fn cookbook(&self, id: Uuid) -> StoreResult<Option<Cookbook>> {
        self.inner.cookbook(id)
    }

    fn cookbooks(&self, filter: &CookbookFilter) -> StoreResult<Vec<Cookbook>> {
        self.inner.cookbooks(filter)
    }

    fn insert_cookbook(&self, cookbook: &Cookbook) -> StoreResult<()> {
        self.inner.insert_cookbook(cookbook)
    }

    fn update_cookbook(&self, cookbook: &Cookbook) -> StoreResult<bool> {
        self.inner.update_cookbook(cookbook)
    }

    fn purge_cookbook(&self, id: Uuid) -> StoreResult<bool> {
        self.inner.purge_cookbook(id)
    }

    fn cookbook_links(&self, cookbook_id: Uuid) -> StoreResult<Vec<CookbookRecipeLink>> {
        self.inner.cookbook_links(cookbook_id)
    }

    fn cookbooks_with_recipe(&self, recipe_id: Uuid) -> StoreResult<Vec<Uuid>> {
        self.inner.cookbooks_with_recipe(recipe_id)
    }

    fn insert_cookbook_link(&self, link: &CookbookRecipeLink) -> StoreResult<bool> {
        self.inner.insert_cookbook_link(link)
    }

    fn delete_cookbook_link(&self, cookbook_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        self.inner.delete_cookbook_link(cookbook_id, recipe_id)
    }

    fn saved_recipes(&self, user_id: Uuid) -> StoreResult<Vec<SavedRecipe>> {
        self.inner.saved_recipes(user_id)
    }

    fn saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<Option<SavedRecipe>> {
        self.inner.saved_recipe(user_id, recipe_id)
    }

    fn insert_saved(&self, saved: &SavedRecipe) -> StoreResult<bool> {
        self.inner.insert_saved(saved)
    }

    fn delete_saved(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        self.inner.delete_saved(user_id, recipe_id)
    }

    fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        self.inner.profile(id)
    }

    fn profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        self.inner.profile_by_username(username)
    }

    fn upsert_profile(&self, profile: &Profile) -> StoreResult<()> {
        self.inner.upsert_profile(profile)
    }
}

#[test]
fn test_interleaved_set_components_cannot_close_a_cycle() {
    let k = Kitchen::new();
    let stock = k.component(k.anna, "Stock");
    let gravy = k.component(k.anna, "Gravy");
    let Kitchen { store, anna, .. } = k;

    let (stock_id, gravy_id) = (stock.id, gravy.id);
    let store = RacingStore::new(store, move |inner| {
        set_components(inner, anna, gravy_id, &[stock_id]).unwrap();
    });

    let result = set_components(&store, anna, stock_id, &[gravy_id]);

    assert!(
        matches!(&result, Err(EngineError::ValidationFailed(msg)) if msg.contains("cycle")),
        "{result:?}"
    );
    assert_eq!(store.component_ids(gravy_id).unwrap(), vec![stock_id]);
    assert!(store.component_ids(stock_id).unwrap().is_empty());
}

#[test]
fn test_uncomponenting_loses_to_a_link_added_meanwhile() {
    let k = Kitchen::new();
    let crust = k.component(k.anna, "Crust");
    let pie = k.dish(k.anna, "Apple Pie");
    let Kitchen { store, anna, .. } = k;

    let (crust_id, pie_id) = (crust.id, pie.id);
    let store = RacingStore::new(store, move |inner| {
        set_components(inner, anna, pie_id, &[crust_id]).unwrap();
    });

    let mut edit = RecipeDraft::from_recipe(&crust);
    edit.is_component = false;
    let result = update_recipe(&store, anna, crust_id, edit);

    assert!(matches!(result, Err(EngineError::ValidationFailed(_))));
    assert!(store.recipe(crust_id).unwrap().unwrap().is_component);
    assert_eq!(store.parent_ids(crust_id).unwrap(), vec![pie_id]);
}

#[test]
fn test_unrelated_competing_write_does_not_block() {
    let k = Kitchen::new();
    let stock = k.component(k.anna, "Stock");
    let soup = k.dish(k.anna, "Soup");
    let Kitchen { store, anna, .. } = k;

    let store = RacingStore::new(store, move |inner| {
        potluck_core::create_recipe(inner, anna, draft("Bread", false)).unwrap();
    });

    let stored = set_components(&store, anna, soup.id, &[stock.id]).unwrap();
    assert_eq!(stored, vec![stock.id]);
}
