//! Durable record types: the shapes that live in the state file.
//! Wire-level response types live in chirpy-types; the password hash never
//! crosses that boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_chirpy_red: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChirpRecord {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}
