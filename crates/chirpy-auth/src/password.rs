use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::AuthError;

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Check a password against a stored hash. A mismatch and a malformed hash
/// both come back as `false`; verification fails closed.
pub fn verify(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_roundtrip() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &hashed));
    }

    #[test]
    fn wrong_password_fails() {
        let hashed = hash("hunter2").unwrap();
        assert!(!verify("hunter3", &hashed));
    }

    #[test]
    fn hash_is_not_plaintext() {
        let hashed = hash("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn same_password_different_salts() {
        let a = hash("hunter2").unwrap();
        let b = hash("hunter2").unwrap();
        assert_ne!(a, b);
        assert!(verify("hunter2", &a));
        assert!(verify("hunter2", &b));
    }
}
