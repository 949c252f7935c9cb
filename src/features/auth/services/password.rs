//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings, which carry their own salt and
//! parameters, so verification needs nothing but the stored value.
//! Request handlers go through the `*_blocking` wrappers, which run the
//! hashing on tokio's blocking pool instead of a worker thread.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::core::error::{AppError, Result};

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(password: String, stored_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &hash));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("", &hash));
        assert!(!verify_password("Hunter2", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_plaintext_stored_value_never_matches() {
        assert!(!verify_password("secret", "secret"));
    }

    #[tokio::test]
    async fn test_blocking_wrappers_match_sync_versions() {
        let hash = hash_password_blocking("hunter2".to_string()).await.unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(verify_password_blocking("hunter2".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("hunter3".to_string(), hash)
            .await
            .unwrap());
    }
}
