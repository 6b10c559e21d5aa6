use crate::api::{ApiError, ErrorResponse};
use crate::auth::Viewer;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{list_profile_cookbooks, list_profile_recipes, Cookbook, Recipe};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileRecipesResponse {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileCookbooksResponse {
    pub cookbooks: Vec<Cookbook>,
}

#[utoipa::path(
    get,
    path = "/api/profiles/{username}/recipes",
    tag = "profiles",
    params(
        ("username" = String, Path, description = "Public username")
    ),
    responses(
        (status = 200, description = "Standalone recipes on this profile the caller can see", body = ProfileRecipesResponse),
        (status = 404, description = "No such profile", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn profile_recipes(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    match list_profile_recipes(&ctx.store, &principal, &username) {
        Ok(recipes) => (StatusCode::OK, Json(ProfileRecipesResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/profiles/{username}/cookbooks",
    tag = "profiles",
    params(
        ("username" = String, Path, description = "Public username")
    ),
    responses(
        (status = 200, description = "Cookbooks on this profile the caller can see", body = ProfileCookbooksResponse),
        (status = 404, description = "No such profile", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn profile_cookbooks(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    match list_profile_cookbooks(&ctx.store, &principal, &username) {
        Ok(cookbooks) => {
            (StatusCode::OK, Json(ProfileCookbooksResponse { cookbooks })).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
