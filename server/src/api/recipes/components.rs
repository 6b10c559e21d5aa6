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
    cookbooks_containing as engine_cookbooks_containing, resolve_includes,
    set_components as engine_set_components, used_in as engine_used_in, Cookbook, IncludedRecipe,
    Principal,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentsResponse {
    pub recipes: Vec<IncludedRecipe>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetComponentsRequest {
    /// Full replacement list, in display order
    pub component_ids: Vec<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/components",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Direct sub-recipes the caller can see", body = ComponentsResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn get_components(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match resolve_includes(&ctx.store, &principal, id) {
        Ok(recipes) => (StatusCode::OK, Json(ComponentsResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}/components",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Parent recipe ID")
    ),
    request_body = SetComponentsRequest,
    responses(
        (status = 200, description = "Component list replaced", body = ComponentsResponse),
        (status = 400, description = "Cycle, or not one of your component recipes", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_components(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetComponentsRequest>,
) -> impl IntoResponse {
    let result = engine_set_components(&ctx.store, user_id, id, &request.component_ids)
        .and_then(|_| resolve_includes(&ctx.store, &Principal::User(user_id), id));

    match result {
        Ok(recipes) => (StatusCode::OK, Json(ComponentsResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/used-in",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Component recipe ID")
    ),
    responses(
        (status = 200, description = "Recipes that include this one", body = ComponentsResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn used_in(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_used_in(&ctx.store, &principal, id) {
        Ok(recipes) => (StatusCode::OK, Json(ComponentsResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/cookbooks",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Your cookbooks holding this recipe", body = Vec<Cookbook>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn cookbooks_containing(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_cookbooks_containing(&ctx.store, user_id, id) {
        Ok(cookbooks) => (StatusCode::OK, Json(cookbooks)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
