//! Shared fixtures for the engine integration tests.

#![allow(dead_code)]

use potluck_core::{
    claim_username, create_recipe, publish_recipe, set_components, MemoryStore, Recipe,
    RecipeDraft,
};
use uuid::Uuid;

pub struct Kitchen {
    pub store: MemoryStore,
    pub anna: Uuid,
    pub bob: Uuid,
}

impl Kitchen {
    /// Two users with claimed usernames "anna" and "bob".
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let anna = Uuid::new_v4();
        let bob = Uuid::new_v4();
        claim_username(&store, anna, "anna").unwrap();
        claim_username(&store, bob, "bob").unwrap();
        Self { store, anna, bob }
    }

    pub fn dish(&self, owner: Uuid, name: &str) -> Recipe {
        create_recipe(&self.store, owner, draft(name, false)).unwrap()
    }

    pub fn component(&self, owner: Uuid, name: &str) -> Recipe {
        create_recipe(&self.store, owner, draft(name, true)).unwrap()
    }

    pub fn public_dish(&self, owner: Uuid, name: &str) -> Recipe {
        let recipe = self.dish(owner, name);
        publish_recipe(&self.store, owner, recipe.id).unwrap()
    }

    pub fn link(&self, owner: Uuid, parent: &Recipe, children: &[&Recipe]) {
        let ids: Vec<Uuid> = children.iter().map(|c| c.id).collect();
        set_components(&self.store, owner, parent.id, &ids).unwrap();
    }

    /// Anna's public "Pasta Bolognese" built on her private "Tomato Sauce".
    pub fn bolognese(&self) -> (Recipe, Recipe) {
        let sauce = self.component(self.anna, "Tomato Sauce");
        let pasta = self.public_dish(self.anna, "Pasta Bolognese");
        self.link(self.anna, &pasta, &[&sauce]);
        (pasta, sauce)
    }
}

pub fn draft(name: &str, is_component: bool) -> RecipeDraft {
    RecipeDraft {
        name: name.to_string(),
        ingredients: vec!["1 thing".to_string()],
        steps: vec!["do it".to_string()],
        is_component,
        ..Default::default()
    }
}
