//! State transitions and their effect on links and bookmarks.

mod common;

use common::{draft, Kitchen};
use potluck_core::{
    clone_recipe, create_cookbook, empty_trash, get_recipe, hard_delete_recipe, list_saved,
    list_trash, publish_recipe, resolve_includes, restore_recipe, set_components, set_favorite,
    soft_delete_recipe, toggle_cookbook_membership, toggle_save, unpublish_recipe, update_recipe,
    EngineError, EntityStore, Principal, RecipeDraft, RecipeState,
};

#[test]
fn test_clone_of_public_dish() {
    let k = Kitchen::new();
    let (pasta, _sauce) = k.bolognese();

    let copy = clone_recipe(&k.store, k.bob, pasta.id).unwrap();
    assert_ne!(copy.id, pasta.id);
    assert_eq!(copy.owner_id, k.bob);
    assert_eq!(copy.name, pasta.name);
    assert_eq!(copy.state(), RecipeState::Private);
    assert!(k.store.component_ids(copy.id).unwrap().is_empty());

    let mut edit = RecipeDraft::from_recipe(&copy);
    edit.name = "Bob's Bolognese".to_string();
    update_recipe(&k.store, k.bob, copy.id, edit).unwrap();

    let original = get_recipe(&k.store, &Principal::Anonymous, pasta.id).unwrap();
    assert_eq!(original.name, "Pasta Bolognese");
    assert_eq!(k.store.component_ids(pasta.id).unwrap().len(), 1);
}

#[test]
fn test_clone_keeps_component_flag() {
    let k = Kitchen::new();
    let (_pasta, sauce) = k.bolognese();

    let copy = clone_recipe(&k.store, k.bob, sauce.id).unwrap();
    assert!(copy.is_component);
    assert!(!copy.is_public);
}

#[test]
fn test_clone_requires_visibility() {
    let k = Kitchen::new();
    let secret = k.dish(k.anna, "Secret Stew");
    assert_eq!(
        clone_recipe(&k.store, k.bob, secret.id),
        Err(EngineError::NotFound)
    );
}

#[test]
fn test_restore_from_trash_is_private() {
    let k = Kitchen::new();
    let lasagna = k.public_dish(k.anna, "Lasagna");

    soft_delete_recipe(&k.store, k.anna, lasagna.id).unwrap();
    let restored = restore_recipe(&k.store, k.anna, lasagna.id).unwrap();

    assert_eq!(restored.state(), RecipeState::Private);
    assert_eq!(
        get_recipe(&k.store, &Principal::Anonymous, lasagna.id),
        Err(EngineError::NotFound)
    );
}

#[test]
fn test_soft_delete_keeps_links_until_purge() {
    let k = Kitchen::new();
    let (pasta, sauce) = k.bolognese();

    soft_delete_recipe(&k.store, k.anna, sauce.id).unwrap();
    assert_eq!(k.store.component_ids(pasta.id).unwrap(), vec![sauce.id]);

    restore_recipe(&k.store, k.anna, sauce.id).unwrap();
    let includes = resolve_includes(&k.store, &Principal::Anonymous, pasta.id).unwrap();
    assert_eq!(includes.len(), 1);
}

#[test]
fn test_hard_delete_cascades_every_reference() {
    let k = Kitchen::new();
    let (pasta, sauce) = k.bolognese();
    let book = create_cookbook(&k.store, k.anna, "Italian").unwrap();
    toggle_cookbook_membership(&k.store, k.anna, book.id, pasta.id).unwrap();
    toggle_save(&k.store, k.bob, pasta.id).unwrap();

    soft_delete_recipe(&k.store, k.anna, pasta.id).unwrap();
    hard_delete_recipe(&k.store, k.anna, pasta.id).unwrap();

    assert_eq!(k.store.recipe(pasta.id).unwrap(), None);
    assert!(k
        .store
        .component_links()
        .unwrap()
        .iter()
        .all(|l| l.parent_id != pasta.id && l.component_id != pasta.id));
    assert!(k.store.cookbook_links(book.id).unwrap().is_empty());
    assert!(k.store.saved_recipes(k.bob).unwrap().is_empty());
    assert!(k.store.parent_ids(sauce.id).unwrap().is_empty());
    // The component itself survives.
    assert!(k.store.recipe(sauce.id).unwrap().is_some());
}

#[test]
fn test_hard_delete_requires_trash() {
    let k = Kitchen::new();
    let lasagna = k.dish(k.anna, "Lasagna");
    assert!(matches!(
        hard_delete_recipe(&k.store, k.anna, lasagna.id),
        Err(EngineError::ValidationFailed(_))
    ));
    assert!(k.store.recipe(lasagna.id).unwrap().is_some());
}

#[test]
fn test_non_owner_cannot_mutate() {
    let k = Kitchen::new();
    let lasagna = k.public_dish(k.anna, "Lasagna");
    assert_eq!(
        soft_delete_recipe(&k.store, k.bob, lasagna.id),
        Err(EngineError::NotFound)
    );
    assert_eq!(
        unpublish_recipe(&k.store, k.bob, lasagna.id),
        Err(EngineError::NotFound)
    );
}

#[test]
fn test_empty_trash_purges_only_trashed() {
    let k = Kitchen::new();
    let keep = k.dish(k.anna, "Keeper");
    let a = k.dish(k.anna, "Burnt Toast");
    let b = k.dish(k.anna, "Soggy Fries");
    soft_delete_recipe(&k.store, k.anna, a.id).unwrap();
    soft_delete_recipe(&k.store, k.anna, b.id).unwrap();
    assert_eq!(list_trash(&k.store, k.anna).unwrap().len(), 2);

    assert_eq!(empty_trash(&k.store, k.anna).unwrap(), 2);
    assert!(list_trash(&k.store, k.anna).unwrap().is_empty());
    assert!(k.store.recipe(keep.id).unwrap().is_some());
}

#[test]
fn test_unpublish_hides_bookmark_without_touching_row() {
    let k = Kitchen::new();
    let lasagna = k.public_dish(k.anna, "Lasagna");
    toggle_save(&k.store, k.bob, lasagna.id).unwrap();
    let row = k.store.saved_recipe(k.bob, lasagna.id).unwrap();
    assert_eq!(list_saved(&k.store, k.bob).unwrap().len(), 1);

    unpublish_recipe(&k.store, k.anna, lasagna.id).unwrap();
    assert!(list_saved(&k.store, k.bob).unwrap().is_empty());
    assert_eq!(k.store.saved_recipe(k.bob, lasagna.id).unwrap(), row);

    publish_recipe(&k.store, k.anna, lasagna.id).unwrap();
    let saved = list_saved(&k.store, k.bob).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].recipe.id, lasagna.id);
    assert_eq!(k.store.saved_recipe(k.bob, lasagna.id).unwrap(), row);
}

#[test]
fn test_cycle_rejected() {
    let k = Kitchen::new();
    let dough = k.component(k.anna, "Dough");
    let starter = k.component(k.anna, "Starter");
    k.link(k.anna, &dough, &[&starter]);

    let err = set_components(&k.store, k.anna, starter.id, &[dough.id]).unwrap_err();
    assert!(matches!(err, EngineError::ValidationFailed(_)));
    assert!(k.store.component_ids(starter.id).unwrap().is_empty());

    assert!(matches!(
        set_components(&k.store, k.anna, dough.id, &[dough.id]),
        Err(EngineError::ValidationFailed(_))
    ));
}

#[test]
fn test_longer_cycle_rejected() {
    let k = Kitchen::new();
    let a = k.component(k.anna, "A");
    let b = k.component(k.anna, "B");
    let c = k.component(k.anna, "C");
    k.link(k.anna, &a, &[&b]);
    k.link(k.anna, &b, &[&c]);

    assert!(set_components(&k.store, k.anna, c.id, &[a.id]).is_err());
}

#[test]
fn test_cross_owner_and_non_component_links_rejected() {
    let k = Kitchen::new();
    let pasta = k.dish(k.anna, "Pasta");
    let bobs_sauce = k.component(k.bob, "Bob's Sauce");
    let side = k.dish(k.anna, "Garlic Bread");

    for id in [bobs_sauce.id, side.id, uuid::Uuid::new_v4()] {
        assert!(matches!(
            set_components(&k.store, k.anna, pasta.id, &[id]),
            Err(EngineError::ValidationFailed(_))
        ));
    }
    assert!(k.store.component_ids(pasta.id).unwrap().is_empty());
}

#[test]
fn test_set_components_replaces_and_dedupes() {
    let k = Kitchen::new();
    let pasta = k.dish(k.anna, "Pasta");
    let sauce = k.component(k.anna, "Sauce");
    let cheese = k.component(k.anna, "Cheese Blend");

    let stored = set_components(&k.store, k.anna, pasta.id, &[cheese.id, sauce.id, cheese.id]).unwrap();
    assert_eq!(stored, vec![cheese.id, sauce.id]);

    set_components(&k.store, k.anna, pasta.id, &[sauce.id]).unwrap();
    assert_eq!(k.store.component_ids(pasta.id).unwrap(), vec![sauce.id]);
}

#[test]
fn test_component_rules() {
    let k = Kitchen::new();
    let (_pasta, sauce) = k.bolognese();

    assert!(matches!(
        publish_recipe(&k.store, k.anna, sauce.id),
        Err(EngineError::ValidationFailed(_))
    ));
    assert!(matches!(
        set_favorite(&k.store, k.anna, sauce.id, true),
        Err(EngineError::ValidationFailed(_))
    ));

    let mut edit = RecipeDraft::from_recipe(&sauce);
    edit.is_component = false;
    assert!(matches!(
        update_recipe(&k.store, k.anna, sauce.id, edit),
        Err(EngineError::ValidationFailed(_))
    ));
}

#[test]
fn test_component_metadata_is_stripped() {
    let k = Kitchen::new();
    let mut d = draft("Pesto", true);
    d.rating = Some(5);
    d.servings = Some(4);
    d.is_favorite = true;

    let pesto = potluck_core::create_recipe(&k.store, k.anna, d).unwrap();
    assert_eq!(pesto.rating, None);
    assert_eq!(pesto.servings, None);
    assert!(!pesto.is_favorite);
}

#[test]
fn test_component_edit_cannot_publish() {
    let k = Kitchen::new();
    let mut d = draft("Pesto", true);
    d.is_public = true;
    let pesto = potluck_core::create_recipe(&k.store, k.anna, d).unwrap();
    assert!(!pesto.is_public);

    let mut edit = RecipeDraft::from_recipe(&pesto);
    edit.is_public = true;
    let pesto = update_recipe(&k.store, k.anna, pesto.id, edit).unwrap();
    assert!(!pesto.is_public);
    assert!(matches!(
        get_recipe(&k.store, &Principal::User(k.bob), pesto.id),
        Err(EngineError::NotFound)
    ));
}

#[test]
fn test_trashed_recipe_cannot_be_edited() {
    let k = Kitchen::new();
    let lasagna = k.dish(k.anna, "Lasagna");
    soft_delete_recipe(&k.store, k.anna, lasagna.id).unwrap();

    assert!(matches!(
        update_recipe(&k.store, k.anna, lasagna.id, draft("Lasagna 2", false)),
        Err(EngineError::ValidationFailed(_))
    ));
    assert_eq!(
        update_recipe(&k.store, k.bob, lasagna.id, draft("Mine now", false)),
        Err(EngineError::NotFound)
    );
}
