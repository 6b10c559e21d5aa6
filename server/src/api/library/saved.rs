use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{list_saved as engine_list_saved, SavedEntry};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedRecipesResponse {
    pub saved: Vec<SavedEntry>,
}

#[utoipa::path(
    get,
    path = "/api/saved",
    tag = "library",
    responses(
        (status = 200, description = "Bookmarked recipes you can currently see, newest first", body = SavedRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_saved(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match engine_list_saved(&ctx.store, user_id) {
        Ok(saved) => (StatusCode::OK, Json(SavedRecipesResponse { saved })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
