use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;
use crate::models::{ChirpRecord, UserRecord};

/// The full persisted state. Every mutation rewrites this whole structure;
/// the on-disk layout is exactly the serde_json encoding of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreState {
    pub users: Vec<UserRecord>,
    pub chirps: Vec<ChirpRecord>,
    /// Raw refresh token -> when it was revoked.
    pub revoked: HashMap<String, DateTime<Utc>>,
    /// Ids are never reused, even after a delete, so the counters are part
    /// of the durable state rather than derived from the live records.
    #[serde(default = "first_id")]
    pub next_user_id: u64,
    #[serde(default = "first_id")]
    pub next_chirp_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            chirps: Vec::new(),
            revoked: HashMap::new(),
            next_user_id: 1,
            next_chirp_id: 1,
        }
    }
}

/// Load state from disk. A missing file is a fresh start; a file that exists
/// but does not decode is fatal to the caller; there is no partial recovery.
pub(crate) fn load(path: &Path) -> Result<StoreState, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreState::default()),
        Err(e) => return Err(StoreError::Io(e)),
    };
    serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
}

/// Full-file rewrite: encode the whole state, write it next to the live
/// file, then rename over it so a crash mid-write never leaves a torn file.
pub(crate) fn sync(state: &StoreState, path: &Path) -> Result<(), StoreError> {
    let encoded = serde_json::to_vec(state).map_err(StoreError::Encode)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &encoded).map_err(StoreError::Io)?;
    fs::rename(&tmp, path).map_err(StoreError::Io)?;
    Ok(())
}
