pub mod chirps;
pub mod models;
pub mod persist;
pub mod revocations;
pub mod users;

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use thiserror::Error;
use tracing::info;

pub use chirps::MAX_CHIRP_LEN;
pub use models::{ChirpRecord, UserRecord};
pub use persist::StoreState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email is already in use")]
    EmailTaken,
    /// Unknown email and wrong password collapse into one failure so the
    /// login endpoint cannot be used to probe which emails are registered.
    #[error("incorrect email or password")]
    BadCredentials,
    /// The id from an otherwise valid session has no matching user.
    #[error("no user exists for this session")]
    UnknownAccount,
    #[error("user not found")]
    UserNotFound,
    #[error("chirp not found")]
    ChirpNotFound,
    #[error("chirp is too long")]
    ChirpTooLong,
    #[error("only the author may delete a chirp")]
    NotAuthor,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("state file is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("state file i/o failed: {0}")]
    Io(#[source] std::io::Error),
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// In-memory tables for users, chirps, and revoked tokens, mirrored to a
/// single JSON file. One readers-writer lock guards the whole state as a
/// unit: mutations hold it exclusively for the in-memory change plus the
/// disk sync, reads share it.
pub struct Store {
    state: RwLock<StoreState>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open a file-backed store. A missing file starts empty; an existing
    /// file that fails to decode is a fatal error, not a fresh start.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = persist::load(&path)?;
        info!(
            path = %path.display(),
            users = state.users.len(),
            chirps = state.chirps.len(),
            "store opened"
        );
        Ok(Self {
            state: RwLock::new(state),
            path: Some(path),
        })
    }

    /// A store with no backing file. Mutations skip the disk sync; used by
    /// tests that do not care about durability.
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            path: None,
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    /// Run a mutation under the exclusive lock, syncing to disk before the
    /// change becomes visible. The mutation runs against a copy of the
    /// state, so a failed sync leaves memory exactly as it was; memory and
    /// disk never diverge on a reported failure.
    pub(crate) fn mutate<T>(
        &self,
        op: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        if let Some(path) = &self.path {
            persist::sync(&next, path)?;
        }
        *guard = next;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_preserves_users_and_chirps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        {
            let store = Store::open(&path).unwrap();
            let walt = store.create_user("walt@breakingbad.com", "heisenberg").unwrap();
            let jesse = store.create_user("jesse@breakingbad.com", "yo-science").unwrap();
            store.create_chirp("I am the danger", walt.id).unwrap();
            store.create_chirp("yeah mr white!", jesse.id).unwrap();
            store.revoke_token("stale-refresh-token").unwrap();
        }

        let store = Store::open(&path).unwrap();
        let chirps = store.list_chirps().unwrap();
        assert_eq!(chirps.len(), 2);
        assert_eq!(chirps[0].body, "I am the danger");
        assert_eq!(chirps[1].author_id, 2);

        // Credentials survive the restart.
        let walt = store.authenticate("walt@breakingbad.com", "heisenberg").unwrap();
        assert_eq!(walt.id, 1);
        assert!(store.is_token_revoked("stale-refresh-token"));
    }

    #[test]
    fn open_fails_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "{oops").unwrap();
        assert!(matches!(Store::open(&path), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn failed_sync_rolls_back_the_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        let store = Store::open(&path).unwrap();
        store.create_user("walt@breakingbad.com", "heisenberg").unwrap();

        // Occupy the temp-file slot with a directory so the next sync fails
        // at the write step.
        std::fs::create_dir(dir.path().join("database.tmp")).unwrap();
        let err = store.create_user("jesse@breakingbad.com", "yo-science");
        assert!(matches!(err, Err(StoreError::Io(_))));

        // Memory was not touched and the file still holds only the first user.
        assert!(store.authenticate("jesse@breakingbad.com", "yo-science").is_err());
        std::fs::remove_dir(dir.path().join("database.tmp")).unwrap();
        let reloaded = Store::open(&path).unwrap();
        assert!(reloaded.authenticate("walt@breakingbad.com", "heisenberg").is_ok());
        assert!(reloaded.authenticate("jesse@breakingbad.com", "yo-science").is_err());
    }

    #[test]
    fn ids_continue_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        {
            let store = Store::open(&path).unwrap();
            let user = store.create_user("walt@breakingbad.com", "heisenberg").unwrap();
            let chirp = store.create_chirp("first", user.id).unwrap();
            store.delete_chirp(chirp.id, user.id).unwrap();
        }

        let store = Store::open(&path).unwrap();
        let next = store.create_chirp("second", 1).unwrap();
        // The deleted chirp's id stays burned across restarts.
        assert_eq!(next.id, 2);
    }
}
