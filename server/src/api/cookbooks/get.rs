use crate::api::{ApiError, ErrorResponse};
use crate::auth::Viewer;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{can_mutate_cookbook, get_cookbook as engine_get, Cookbook, Cover};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct CookbookResponse {
    pub cookbook: Cookbook,
    /// What to render as the cover
    pub cover: Cover,
    pub can_edit: bool,
}

#[utoipa::path(
    get,
    path = "/api/cookbooks/{id}",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID")
    ),
    responses(
        (status = 200, description = "Cookbook details", body = CookbookResponse),
        (status = 404, description = "Cookbook not found", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn get_cookbook(
    Viewer(principal): Viewer,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_get(&ctx.store, &principal, id) {
        Ok(cookbook) => {
            let response = CookbookResponse {
                cover: cookbook.cover(),
                can_edit: can_mutate_cookbook(&principal, &cookbook),
                cookbook,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
