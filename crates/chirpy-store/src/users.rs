use chirpy_auth::password;
use tracing::info;

use crate::models::UserRecord;
use crate::{Store, StoreError};

impl Store {
    /// Register a new user. The password is hashed before anything touches
    /// the state; the plaintext is never stored.
    pub fn create_user(&self, email: &str, password: &str) -> Result<UserRecord, StoreError> {
        let password_hash =
            password::hash(password).map_err(|e| StoreError::Hash(e.to_string()))?;
        let user = self.mutate(|state| {
            if state.users.iter().any(|u| u.email == email) {
                return Err(StoreError::EmailTaken);
            }
            let id = state.next_user_id;
            state.next_user_id += 1;
            let user = UserRecord {
                id,
                email: email.to_string(),
                password_hash,
                is_chirpy_red: false,
            };
            state.users.push(user.clone());
            Ok(user)
        })?;
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Check a credential pair against the stored hash.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserRecord, StoreError> {
        let state = self.read()?;
        let user = state
            .users
            .iter()
            .find(|u| u.email == email)
            .ok_or(StoreError::BadCredentials)?;
        if !password::verify(password, &user.password_hash) {
            return Err(StoreError::BadCredentials);
        }
        Ok(user.clone())
    }

    /// Replace a user's email and password. The email must not collide with
    /// a different user; keeping your own email is fine.
    pub fn update_user(
        &self,
        id: u64,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, StoreError> {
        let password_hash =
            password::hash(password).map_err(|e| StoreError::Hash(e.to_string()))?;
        self.mutate(|state| {
            if state.users.iter().any(|u| u.email == email && u.id != id) {
                return Err(StoreError::EmailTaken);
            }
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(StoreError::UnknownAccount)?;
            user.email = email.to_string();
            user.password_hash = password_hash;
            Ok(user.clone())
        })
    }

    /// Flip the Chirpy Red flag for a user. Idempotent.
    pub fn upgrade_to_chirpy_red(&self, user_id: u64) -> Result<(), StoreError> {
        self.mutate(|state| {
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(StoreError::UserNotFound)?;
            user.is_chirpy_red = true;
            Ok(())
        })
    }
}
