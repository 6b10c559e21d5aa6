pub mod claim;
pub mod pages;

use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for profile endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/profile", put(claim::claim_username))
        .route("/api/profiles/{username}/recipes", get(pages::profile_recipes))
        .route("/api/profiles/{username}/cookbooks", get(pages::profile_cookbooks))
}

#[derive(OpenApi)]
#[openapi(
    paths(claim::claim_username, pages::profile_recipes, pages::profile_cookbooks),
    components(schemas(
        claim::ClaimUsernameRequest,
        potluck_core::Profile,
        pages::ProfileRecipesResponse,
        pages::ProfileCookbooksResponse,
    ))
)]
pub struct ApiDoc;
