//! Entity store abstraction.
//!
//! The store is a dumb persistence layer: predicate-filtered reads and writes
//! over recipes, cookbooks, links, bookmarks and profiles. All business rules
//! live in the engine modules. Methods that touch more than one row must be
//! applied atomically by the implementation.

mod memory;

pub use memory::MemoryStore;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::types::{ComponentLink, Cookbook, CookbookRecipeLink, Profile, Recipe, SavedRecipe};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A checked write's precondition failed; nothing was written.
    #[error("{0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Precondition run against an owner's graph inside a checked write.
/// `Err` carries the message returned to the caller.
pub type GraphCheck<'a> = &'a dyn Fn(&OwnerGraph) -> Result<(), String>;

/// One owner's recipes and the component links between them, as seen from
/// inside the atomic unit of a checked write.
///
/// Links never cross owners, so this is the whole graph any of the owner's
/// recipes can reach.
#[derive(Debug, Clone, Default)]
pub struct OwnerGraph {
    recipes: HashMap<Uuid, Recipe>,
    links: Vec<ComponentLink>,
}

impl OwnerGraph {
    pub fn new(recipes: impl IntoIterator<Item = Recipe>, links: Vec<ComponentLink>) -> Self {
        Self {
            recipes: recipes.into_iter().map(|r| (r.id, r)).collect(),
            links,
        }
    }

    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    pub fn parents(&self, component_id: Uuid) -> impl Iterator<Item = Uuid> + '_ {
        self.links
            .iter()
            .filter(move |l| l.component_id == component_id)
            .map(|l| l.parent_id)
    }

    /// Every recipe reachable downward from `root`, deleted ones included.
    pub fn descendants(&self, root: Uuid) -> HashSet<Uuid> {
        let mut seen = HashSet::new();
        let mut frontier = vec![root];

        while let Some(id) = frontier.pop() {
            for link in self.links.iter().filter(|l| l.parent_id == id) {
                if seen.insert(link.component_id) {
                    frontier.push(link.component_id);
                }
            }
        }

        seen
    }
}

/// Predicate over recipe rows. `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub owner_id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub deleted: Option<bool>,
    pub is_public: Option<bool>,
    pub is_component: Option<bool>,
    pub is_favorite: Option<bool>,
}

impl RecipeFilter {
    pub fn owned_by(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    pub fn with_ids(ids: Vec<Uuid>) -> Self {
        Self {
            ids: Some(ids),
            ..Default::default()
        }
    }

    pub fn active(mut self) -> Self {
        self.deleted = Some(false);
        self
    }

    pub fn trashed(mut self) -> Self {
        self.deleted = Some(true);
        self
    }

    pub fn components(mut self, is_component: bool) -> Self {
        self.is_component = Some(is_component);
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    pub fn favorites(mut self) -> Self {
        self.is_favorite = Some(true);
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.owner_id.is_none_or(|owner| recipe.owner_id == owner)
            && self.ids.as_ref().is_none_or(|ids| ids.contains(&recipe.id))
            && self.deleted.is_none_or(|d| recipe.is_deleted() == d)
            && self.is_public.is_none_or(|p| recipe.is_public == p)
            && self.is_component.is_none_or(|c| recipe.is_component == c)
            && self.is_favorite.is_none_or(|f| recipe.is_favorite == f)
    }
}

/// Predicate over cookbook rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookbookFilter {
    pub owner_id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub deleted: Option<bool>,
    pub is_public: Option<bool>,
}

impl CookbookFilter {
    pub fn owned_by(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    pub fn with_ids(ids: Vec<Uuid>) -> Self {
        Self {
            ids: Some(ids),
            ..Default::default()
        }
    }

    pub fn active(mut self) -> Self {
        self.deleted = Some(false);
        self
    }

    pub fn trashed(mut self) -> Self {
        self.deleted = Some(true);
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    pub fn restrict_to(mut self, ids: Vec<Uuid>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn matches(&self, cookbook: &Cookbook) -> bool {
        self.owner_id.is_none_or(|owner| cookbook.owner_id == owner)
            && self.ids.as_ref().is_none_or(|ids| ids.contains(&cookbook.id))
            && self.deleted.is_none_or(|d| cookbook.is_deleted() == d)
            && self.is_public.is_none_or(|p| cookbook.is_public == p)
    }
}

/// Durable storage for every entity kind.
///
/// Listing methods return rows most recently updated first.
pub trait EntityStore: Send + Sync {
    fn recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>>;

    fn recipes(&self, filter: &RecipeFilter) -> StoreResult<Vec<Recipe>>;

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()>;

    /// Overwrite a recipe row. Returns false when no row has that id.
    fn update_recipe(&self, recipe: &Recipe) -> StoreResult<bool>;

    /// Remove a tombstoned recipe together with every component link (either
    /// side), cookbook link and bookmark that references it, in one atomic
    /// unit. Returns false, writing nothing, when no tombstoned recipe has
    /// that id.
    fn purge_recipe(&self, id: Uuid) -> StoreResult<bool>;

    /// Direct children of a recipe, in display order.
    fn component_ids(&self, parent_id: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Recipes that list this recipe as a direct component.
    fn parent_ids(&self, component_id: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Atomically replace the full child set of `parent_id`, unchecked.
    fn replace_components(&self, parent_id: Uuid, component_ids: &[Uuid]) -> StoreResult<()>;

    /// Replace the child set of `parent_id` only if `check` accepts
    /// `owner_id`'s graph as read inside the same atomic unit. Checked writes
    /// for one owner are serialized, so two of them can never both pass
    /// against a graph the other is about to change. A refusal is
    /// `StoreError::Rejected` and writes nothing.
    fn replace_components_checked(
        &self,
        owner_id: Uuid,
        parent_id: Uuid,
        component_ids: &[Uuid],
        check: GraphCheck<'_>,
    ) -> StoreResult<()>;

    /// Overwrite a recipe row only if `check` accepts its owner's graph,
    /// serialized with `replace_components_checked`. Returns false when no
    /// row has that id.
    fn update_recipe_checked(&self, recipe: &Recipe, check: GraphCheck<'_>) -> StoreResult<bool>;

    fn cookbook(&self, id: Uuid) -> StoreResult<Option<Cookbook>>;

    fn cookbooks(&self, filter: &CookbookFilter) -> StoreResult<Vec<Cookbook>>;

    fn insert_cookbook(&self, cookbook: &Cookbook) -> StoreResult<()>;

    fn update_cookbook(&self, cookbook: &Cookbook) -> StoreResult<bool>;

    /// Remove a tombstoned cookbook and all of its membership links
    /// atomically. Member recipes are untouched.
    fn purge_cookbook(&self, id: Uuid) -> StoreResult<bool>;

    /// Membership links of a cookbook, oldest first.
    fn cookbook_links(&self, cookbook_id: Uuid) -> StoreResult<Vec<CookbookRecipeLink>>;

    /// Ids of the cookbooks that hold a recipe.
    fn cookbooks_with_recipe(&self, recipe_id: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Insert unless the (cookbook, recipe) pair already exists. Returns
    /// whether a row was written.
    fn insert_cookbook_link(&self, link: &CookbookRecipeLink) -> StoreResult<bool>;

    /// Returns whether a row was removed.
    fn delete_cookbook_link(&self, cookbook_id: Uuid, recipe_id: Uuid) -> StoreResult<bool>;

    /// A user's bookmarks, newest first, regardless of target visibility.
    fn saved_recipes(&self, user_id: Uuid) -> StoreResult<Vec<SavedRecipe>>;

    fn saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<Option<SavedRecipe>>;

    /// Insert unless the (user, recipe) pair already exists.
    fn insert_saved(&self, saved: &SavedRecipe) -> StoreResult<bool>;

    fn delete_saved(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<bool>;

    fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>>;

    fn profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>>;

    /// Insert or update by id. A username held by another profile yields
    /// `StoreError::Conflict`.
    fn upsert_profile(&self, profile: &Profile) -> StoreResult<()>;
}

/// Most recently deleted first; used for trash listings.
pub(crate) fn deleted_order(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> std::cmp::Ordering {
    b.cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecipeDraft;

    fn recipe(owner: Uuid) -> Recipe {
        let draft = RecipeDraft {
            name: "Toast".to_string(),
            ingredients: vec!["bread".to_string()],
            steps: vec!["toast it".to_string()],
            ..Default::default()
        };
        Recipe::from_draft(owner, draft, Utc::now())
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let r = recipe(Uuid::new_v4());
        assert!(RecipeFilter::default().matches(&r));
    }

    #[test]
    fn test_filter_combines_predicates() {
        let owner = Uuid::new_v4();
        let mut r = recipe(owner);
        r.is_public = true;

        assert!(RecipeFilter::owned_by(owner).active().public(true).matches(&r));
        assert!(!RecipeFilter::owned_by(owner).trashed().matches(&r));
        assert!(!RecipeFilter::owned_by(Uuid::new_v4()).matches(&r));
        assert!(!RecipeFilter::default().components(true).matches(&r));
        assert!(RecipeFilter::with_ids(vec![r.id]).matches(&r));
        assert!(!RecipeFilter::with_ids(vec![]).matches(&r));
    }

    #[test]
    fn test_owner_graph_descendants_walks_full_depth() {
        let (a, b, c, d) = (
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let link = |parent_id, component_id| ComponentLink {
            parent_id,
            component_id,
        };
        let graph = OwnerGraph::new(vec![], vec![link(a, b), link(b, c), link(b, d)]);

        assert_eq!(graph.descendants(a), HashSet::from([b, c, d]));
        assert!(graph.descendants(d).is_empty());
        assert_eq!(graph.parents(c).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_deleted_order_newest_first() {
        let earlier = Utc::now() - chrono::Duration::minutes(5);
        let later = Utc::now();
        let mut stamps = vec![Some(earlier), Some(later)];
        stamps.sort_by(|a, b| deleted_order(*a, *b));
        assert_eq!(stamps, vec![Some(later), Some(earlier)]);
    }
}
