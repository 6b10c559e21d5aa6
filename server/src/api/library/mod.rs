pub mod saved;
pub mod trash;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the caller's trash and bookmarks
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/trash", get(trash::list_trash).delete(trash::empty_trash))
        .route("/api/saved", get(saved::list_saved))
}

#[derive(OpenApi)]
#[openapi(
    paths(trash::list_trash, trash::empty_trash, saved::list_saved),
    components(schemas(
        trash::TrashResponse,
        trash::EmptyTrashResponse,
        saved::SavedRecipesResponse,
    ))
)]
pub struct ApiDoc;
