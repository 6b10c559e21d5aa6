//! Profiles and their public usernames.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::store::EntityStore;
use crate::types::Profile;
use crate::validation::validate_username;

/// Create the actor's profile, or rename it.
pub fn claim_username(store: &dyn EntityStore, actor: Uuid, username: &str) -> EngineResult<Profile> {
    let username = validate_username(username)?;
    let now = Utc::now();

    let profile = match store.profile(actor)? {
        Some(existing) if existing.username == username => return Ok(existing),
        Some(existing) => Profile {
            username,
            updated_at: now,
            ..existing
        },
        None => Profile {
            id: actor,
            username,
            created_at: now,
            updated_at: now,
        },
    };

    store.upsert_profile(&profile).map_err(|err| match EngineError::from(err) {
        EngineError::ConflictFailed(_) => {
            EngineError::ConflictFailed(format!("Username '{}' is already taken", profile.username))
        }
        other => other,
    })?;

    tracing::info!(user_id = %actor, username = %profile.username, "username claimed");
    Ok(profile)
}

/// Look a profile up by its public username. Input is normalized the same
/// way as on write, so `Anna` finds `anna`.
pub fn get_profile_by_username(store: &dyn EntityStore, username: &str) -> EngineResult<Profile> {
    let username = username.trim().to_lowercase();
    store
        .profile_by_username(&username)?
        .ok_or(EngineError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_claim_creates_then_renames() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        let created = claim_username(&store, user, "Anna").unwrap();
        assert_eq!(created.username, "anna");
        assert_eq!(created.id, user);

        let renamed = claim_username(&store, user, "anna_cooks").unwrap();
        assert_eq!(renamed.username, "anna_cooks");
        assert_eq!(renamed.created_at, created.created_at);
        assert!(get_profile_by_username(&store, "anna").is_err());
        assert_eq!(get_profile_by_username(&store, "ANNA_cooks").unwrap().id, user);
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        claim_username(&store, Uuid::new_v4(), "bob").unwrap();

        let err = claim_username(&store, Uuid::new_v4(), "Bob").unwrap_err();
        assert_eq!(
            err,
            EngineError::ConflictFailed("Username 'bob' is already taken".to_string())
        );
    }

    #[test]
    fn test_invalid_username_rejected_before_write() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(matches!(
            claim_username(&store, user, "no spaces"),
            Err(EngineError::ValidationFailed(_))
        ));
        assert_eq!(store.profile(user).unwrap(), None);
    }
}
