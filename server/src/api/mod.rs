pub mod cookbooks;
pub mod library;
pub mod profiles;
pub mod recipes;
pub mod testing;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use potluck_core::{
    Cookbook, Cover, Difficulty, EngineError, IncludedRecipe, Recipe, RecipeDraft,
};
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Engine failures mapped onto HTTP statuses.
///
/// `NotFound` covers both "missing" and "hidden from you"; the response body
/// never says which.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            EngineError::NotFound => StatusCode::NOT_FOUND,
            EngineError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            EngineError::ConflictFailed(_) => StatusCode::CONFLICT,
            EngineError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self.0 {
            EngineError::ValidationFailed(message) | EngineError::ConflictFailed(message) => {
                message.clone()
            }
            EngineError::NotFound => "Not found".to_string(),
            EngineError::UpstreamUnavailable(message) => {
                tracing::warn!(error = %message, "upstream unavailable");
                "Service temporarily unavailable".to_string()
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(
        ErrorResponse,
        Recipe,
        RecipeDraft,
        Difficulty,
        IncludedRecipe,
        Cookbook,
        Cover,
    )))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        testing::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        library::ApiDoc::openapi(),
        cookbooks::ApiDoc::openapi(),
        profiles::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_map_to_statuses() {
        let cases = [
            (EngineError::NotFound, StatusCode::NOT_FOUND),
            (EngineError::ValidationFailed("x".into()), StatusCode::BAD_REQUEST),
            (EngineError::ConflictFailed("x".into()), StatusCode::CONFLICT),
            (
                EngineError::UpstreamUnavailable("db".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_openapi_lists_core_routes() {
        let spec = openapi();
        for path in [
            "/api/recipes",
            "/api/recipes/{id}",
            "/api/recipes/{id}/components",
            "/api/cookbooks/{id}/recipes/{recipe_id}",
            "/api/profiles/{username}/recipes",
            "/api/saved",
            "/api/test/unauthed-ping",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
