use chirpy_auth::RevocationLedger;
use chirpy_auth::token::REFRESH_TOKEN_LIFETIME_DAYS;
use chrono::{Duration, Utc};

use crate::{Store, StoreError};

impl Store {
    /// Record the current timestamp against a raw refresh token. Entries
    /// older than the maximum refresh lifetime are pruned on the way in: a
    /// token revoked that long ago has expired on its own, so dropping the
    /// entry changes nothing observable.
    pub fn revoke_token(&self, token: &str) -> Result<(), StoreError> {
        let now = Utc::now();
        self.mutate(|state| {
            let horizon = now - Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
            state.revoked.retain(|_, revoked_at| *revoked_at > horizon);
            state.revoked.insert(token.to_string(), now);
            Ok(())
        })
    }

    pub fn is_token_revoked(&self, token: &str) -> bool {
        // A poisoned lock fails closed: treat everything as revoked rather
        // than accept tokens we can no longer check.
        self.read()
            .map(|state| state.revoked.contains_key(token))
            .unwrap_or(true)
    }
}

impl RevocationLedger for Store {
    fn is_revoked(&self, token: &str) -> bool {
        self.is_token_revoked(token)
    }
}
