use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{toggle_save as engine_toggle, SaveToggle};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    pub saved: bool,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/save",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Bookmark toggled", body = SaveResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_save(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_toggle(&ctx.store, user_id, id) {
        Ok(toggle) => (
            StatusCode::OK,
            Json(SaveResponse {
                saved: toggle == SaveToggle::Saved,
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
