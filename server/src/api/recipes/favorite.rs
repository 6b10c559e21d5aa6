use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{set_favorite as engine_set_favorite, Recipe};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub favorite: bool,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite flag updated", body = Recipe),
        (status = 400, description = "Component recipes cannot be favorites", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_favorite(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FavoriteRequest>,
) -> impl IntoResponse {
    match engine_set_favorite(&ctx.store, user_id, id, request.favorite) {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
