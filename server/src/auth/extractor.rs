use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use potluck_core::Principal;
use uuid::Uuid;

use super::db::get_user_id_from_token;

/// Extractor for handlers that require a signed-in user.
///
/// ```ignore
/// async fn my_handler(AuthUser(user_id): AuthUser) -> impl IntoResponse {
///     // user_id is the caller's Uuid
/// }
/// ```
pub struct AuthUser(pub Uuid);

/// Extractor for read paths that also serve anonymous callers. A missing
/// Authorization header yields `Principal::Anonymous`; a bad one is rejected.
pub struct Viewer(pub Principal);

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
    /// The session store could not be reached.
    Unavailable,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingHeader => (StatusCode::UNAUTHORIZED, "Missing Authorization header"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Pull the bearer token out of the request, if there is an Authorization header.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AuthError> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;
    auth_str
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or(AuthError::InvalidFormat)
}

async fn resolve(state: &AppState, token: &str) -> Result<Uuid, AuthError> {
    get_user_id_from_token(state.store.pool(), token)
        .await
        .map_err(|_| AuthError::Unavailable)?
        .ok_or(AuthError::InvalidToken)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let token = bearer_token(parts)?.ok_or(AuthError::MissingHeader)?;
        Ok(AuthUser(resolve(&app, token).await?))
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        match bearer_token(parts)? {
            Some(token) => Ok(Viewer(Principal::User(resolve(&app, token).await?))),
            None => Ok(Viewer(Principal::Anonymous)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/recipes");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(None)), Ok(None));
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))), Ok(Some("abc")));
        assert_eq!(
            bearer_token(&parts(Some("Basic abc"))),
            Err(AuthError::InvalidFormat)
        );
    }

    #[test]
    fn test_auth_error_is_unauthorized() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_session_store_outage_is_unavailable() {
        let response = AuthError::Unavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
