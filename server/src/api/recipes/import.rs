use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{import_recipe as engine_import, Recipe};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportRecipeRequest {
    /// Visible text of the page to extract a recipe from
    pub page_text: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/import",
    tag = "recipes",
    request_body = ImportRecipeRequest,
    responses(
        (status = 201, description = "Private recipe created from the page", body = Recipe),
        (status = 400, description = "Extracted recipe failed validation", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Extraction service unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn import_recipe(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Json(request): Json<ImportRecipeRequest>,
) -> impl IntoResponse {
    match engine_import(&ctx.store, ctx.extractor.as_ref(), user_id, &request.page_text).await {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
