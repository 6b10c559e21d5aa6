use sha2::{Digest, Sha256};

/// Sessions are stored by the SHA-256 of their bearer token, never the token itself.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
