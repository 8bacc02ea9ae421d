use crate::models::ChirpRecord;
use crate::{Store, StoreError};

pub const MAX_CHIRP_LEN: usize = 140;

impl Store {
    /// Store a chirp. The caller passes the body it wants persisted (the API
    /// layer censors profanity first); anything over 140 characters is
    /// rejected here regardless.
    pub fn create_chirp(&self, body: &str, author_id: u64) -> Result<ChirpRecord, StoreError> {
        if body.chars().count() > MAX_CHIRP_LEN {
            return Err(StoreError::ChirpTooLong);
        }
        self.mutate(|state| {
            let id = state.next_chirp_id;
            state.next_chirp_id += 1;
            let chirp = ChirpRecord {
                id,
                body: body.to_string(),
                author_id,
            };
            state.chirps.push(chirp.clone());
            Ok(chirp)
        })
    }

    /// Lookup is by id, not list position: ids and indexes drift apart as
    /// soon as anything is deleted.
    pub fn get_chirp(&self, id: u64) -> Result<ChirpRecord, StoreError> {
        self.read()?
            .chirps
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::ChirpNotFound)
    }

    /// All chirps in insertion order.
    pub fn list_chirps(&self) -> Result<Vec<ChirpRecord>, StoreError> {
        Ok(self.read()?.chirps.clone())
    }

    /// Remove a chirp, but only for its author.
    pub fn delete_chirp(&self, id: u64, requester_id: u64) -> Result<(), StoreError> {
        self.mutate(|state| {
            let idx = state
                .chirps
                .iter()
                .position(|c| c.id == id)
                .ok_or(StoreError::ChirpNotFound)?;
            if state.chirps[idx].author_id != requester_id {
                return Err(StoreError::NotAuthor);
            }
            state.chirps.remove(idx);
            Ok(())
        })
    }
}
