use crate::api::{ApiError, ErrorResponse};
use crate::auth::{AuthUser, Viewer};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{
    list_cookbook_recipes, toggle_cookbook_membership, MembershipToggle, Recipe,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct MembersResponse {
    /// In the order they were added
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleMemberResponse {
    pub member: bool,
}

#[utoipa::path(
    get,
    path = "/api/cookbooks/{id}/recipes",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID")
    ),
    responses(
        (status = 200, description = "Members the caller can see", body = MembersResponse),
        (status = 404, description = "Cookbook not found", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn list_members(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match list_cookbook_recipes(&ctx.store, &principal, id) {
        Ok(recipes) => (StatusCode::OK, Json(MembersResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/cookbooks/{id}/recipes/{recipe_id}",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID"),
        ("recipe_id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Membership toggled", body = ToggleMemberResponse),
        (status = 400, description = "Cannot add an item from the trash", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Cookbook or recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_member(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path((id, recipe_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match toggle_cookbook_membership(&ctx.store, user_id, id, recipe_id) {
        Ok(toggle) => (
            StatusCode::OK,
            Json(ToggleMemberResponse {
                member: toggle == MembershipToggle::Added,
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
