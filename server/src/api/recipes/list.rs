use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{list_own_recipes, OwnRecipeQuery, Recipe};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// `true` for component recipes only, `false` for dishes only
    pub components: Option<bool>,
    #[serde(default)]
    pub favorites: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<Recipe>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Your active recipes", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_recipes(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let query = OwnRecipeQuery {
        components: params.components,
        favorites_only: params.favorites,
    };

    match list_own_recipes(&ctx.store, user_id, query) {
        Ok(recipes) => (StatusCode::OK, Json(ListRecipesResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
