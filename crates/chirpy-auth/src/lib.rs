pub mod password;
pub mod token;

use thiserror::Error;

pub use token::{RevocationLedger, TokenRole, TokenService};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad signature, wrong issuer, expired, or otherwise unusable token.
    #[error("token is not authorized")]
    InvalidToken,
    /// The token itself is fine but it has been explicitly revoked.
    #[error("token has been revoked")]
    RevokedToken,
    /// Password hashing is an internal failure, never a caller mistake.
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token signing failed: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}
