pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod update;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/cookbooks endpoints (mounted at /api/cookbooks)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_cookbooks).post(create::create_cookbook))
        .route("/trash", get(list::list_cookbook_trash))
        .route(
            "/{id}",
            get(get::get_cookbook)
                .put(update::update_cookbook)
                .delete(delete::delete_cookbook),
        )
        .route("/{id}/restore", post(delete::restore_cookbook))
        .route("/{id}/purge", delete(delete::purge_cookbook))
        .route("/{id}/recipes", get(members::list_members))
        .route("/{id}/recipes/{recipe_id}", post(members::toggle_member))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_cookbooks,
        list::list_cookbook_trash,
        create::create_cookbook,
        get::get_cookbook,
        update::update_cookbook,
        delete::delete_cookbook,
        delete::restore_cookbook,
        delete::purge_cookbook,
        members::list_members,
        members::toggle_member,
    ),
    components(schemas(
        list::ListCookbooksResponse,
        create::CreateCookbookRequest,
        get::CookbookResponse,
        potluck_core::CookbookUpdate,
        members::MembersResponse,
        members::ToggleMemberResponse,
    ))
)]
pub struct ApiDoc;
