use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{list_cookbook_trash as engine_trash, list_cookbooks as engine_list, Cookbook};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ListCookbooksResponse {
    pub cookbooks: Vec<Cookbook>,
}

#[utoipa::path(
    get,
    path = "/api/cookbooks",
    tag = "cookbooks",
    responses(
        (status = 200, description = "Your active cookbooks", body = ListCookbooksResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_cookbooks(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match engine_list(&ctx.store, user_id) {
        Ok(cookbooks) => (StatusCode::OK, Json(ListCookbooksResponse { cookbooks })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/cookbooks/trash",
    tag = "cookbooks",
    responses(
        (status = 200, description = "Cookbooks in your trash, most recently deleted first", body = ListCookbooksResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_cookbook_trash(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match engine_trash(&ctx.store, user_id) {
        Ok(cookbooks) => (StatusCode::OK, Json(ListCookbooksResponse { cookbooks })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
