use crate::db::DbPool;
use crate::schema::sessions;
use chrono::Utc;
use diesel::prelude::*;
use potluck_core::{StoreError, StoreResult};
use uuid::Uuid;

use super::crypto::hash_token;

/// Resolve a bearer token to the user id of an unexpired session.
///
/// `Ok(None)` means no such session; a database failure is an error so the
/// caller can tell "sign in again" from "try again later".
pub async fn get_user_id_from_token(pool: &DbPool, token: &str) -> StoreResult<Option<Uuid>> {
    let mut conn = pool.get().map_err(|e| {
        tracing::error!("Session lookup could not get a connection: {}", e);
        StoreError::Unavailable("Database connection failed".to_string())
    })?;
    let token_hash = hash_token(token);

    sessions::table
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(sessions::user_id)
        .first(&mut conn)
        .optional()
        .map_err(|e| {
            tracing::error!("Session lookup failed: {}", e);
            StoreError::Unavailable("Database query failed".to_string())
        })
}
