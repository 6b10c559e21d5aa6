pub mod clone;
pub mod components;
pub mod create;
pub mod delete;
pub mod favorite;
pub mod get;
pub mod import;
pub mod list;
pub mod publish;
pub mod save;
pub mod update;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/import", post(import::import_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/purge", delete(delete::purge_recipe))
        .route("/{id}/publish", post(publish::publish_recipe))
        .route("/{id}/unpublish", post(publish::unpublish_recipe))
        .route("/{id}/restore", post(delete::restore_recipe))
        .route("/{id}/clone", post(clone::clone_recipe))
        .route("/{id}/save", post(save::toggle_save))
        .route("/{id}/favorite", post(favorite::set_favorite))
        .route(
            "/{id}/components",
            get(components::get_components).put(components::set_components),
        )
        .route("/{id}/used-in", get(components::used_in))
        .route("/{id}/cookbooks", get(components::cookbooks_containing))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        import::import_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        delete::restore_recipe,
        delete::purge_recipe,
        publish::publish_recipe,
        publish::unpublish_recipe,
        clone::clone_recipe,
        save::toggle_save,
        favorite::set_favorite,
        components::get_components,
        components::set_components,
        components::used_in,
        components::cookbooks_containing,
    ),
    components(schemas(
        list::ListRecipesResponse,
        get::RecipeDetailResponse,
        import::ImportRecipeRequest,
        save::SaveResponse,
        favorite::FavoriteRequest,
        components::ComponentsResponse,
        components::SetComponentsRequest,
    ))
)]
pub struct ApiDoc;
