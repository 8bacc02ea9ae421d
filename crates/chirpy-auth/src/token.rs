use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// The access token is the short-lived credential presented on every call;
/// the refresh token only ever mints new access tokens and can be revoked.
pub const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 1;
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// The two token flavors, distinguished on the wire by their issuer claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Access,
    Refresh,
}

impl TokenRole {
    pub fn issuer(self) -> &'static str {
        match self {
            TokenRole::Access => "chirpy-access",
            TokenRole::Refresh => "chirpy-refresh",
        }
    }

    fn lifetime(self) -> Duration {
        match self {
            TokenRole::Access => Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS),
            TokenRole::Refresh => Duration::days(REFRESH_TOKEN_LIFETIME_DAYS),
        }
    }
}

/// Lookup seam for refresh tokens that were invalidated before their natural
/// expiry. The store implements this; tests can substitute a fixed set.
pub trait RevocationLedger {
    fn is_revoked(&self, token: &str) -> bool;
}

/// Issues and validates HS256 session tokens. One process-wide secret,
/// injected at construction, never read from the environment here.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_access(&self, user_id: u64) -> Result<String, AuthError> {
        self.issue(TokenRole::Access, user_id)
    }

    pub fn issue_refresh(&self, user_id: u64) -> Result<String, AuthError> {
        self.issue(TokenRole::Refresh, user_id)
    }

    fn issue(&self, role: TokenRole, user_id: u64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            iss: role.issuer().to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + role.lifetime()).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Validate an access token, returning the subject user id.
    pub fn validate_access(&self, token: &str) -> Result<u64, AuthError> {
        self.decode_role(token, TokenRole::Access)
    }

    /// Validate a refresh token. On top of signature, expiry, and issuer
    /// checks, a token found in the revocation ledger is rejected no matter
    /// how much lifetime it has left.
    pub fn validate_refresh(
        &self,
        token: &str,
        ledger: &dyn RevocationLedger,
    ) -> Result<u64, AuthError> {
        let user_id = self.decode_role(token, TokenRole::Refresh)?;
        if ledger.is_revoked(token) {
            return Err(AuthError::RevokedToken);
        }
        Ok(user_id)
    }

    fn decode_role(&self, token: &str, role: TokenRole) -> Result<u64, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[role.issuer()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AuthError::InvalidToken)?;
        data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}
