use crate::api::{ApiError, ErrorResponse};
use crate::auth::Viewer;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{
    can_mutate_recipe, get_recipe as engine_get, is_saved, resolve_includes, EngineResult,
    IncludedRecipe, Principal, Recipe,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    pub recipe: Recipe,
    /// Direct sub-recipes the caller can see, in display order
    pub includes: Vec<IncludedRecipe>,
    pub can_edit: bool,
    pub saved: bool,
}

fn load(ctx: &AppState, principal: &Principal, id: Uuid) -> EngineResult<RecipeDetailResponse> {
    let recipe = engine_get(&ctx.store, principal, id)?;
    let includes = resolve_includes(&ctx.store, principal, id)?;
    let saved = match principal.user_id() {
        Some(user_id) => is_saved(&ctx.store, user_id, id)?,
        None => false,
    };
    Ok(RecipeDetailResponse {
        can_edit: can_mutate_recipe(principal, &recipe),
        recipe,
        includes,
        saved,
    })
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetailResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn get_recipe(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match load(&ctx, &principal, id) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
