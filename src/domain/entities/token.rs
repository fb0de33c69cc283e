//! Revoked refresh tokens.
//!
//! Maps to the `token_blacklist` table. Entries only need to outlive the
//! token itself, so expired rows can be purged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A refresh token revoked before its natural expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistedToken {
    /// JWT ID of the revoked token
    pub jti: String,
    pub user_id: i64,
    /// Expiry copied from the token's `exp` claim
    pub expires_at: DateTime<Utc>,
    pub blacklisted_at: DateTime<Utc>,
}

#[async_trait]
pub trait TokenBlacklistRepository: Send + Sync {
    /// Record a revoked token. Returns `false` if it was already revoked.
    async fn blacklist(&self, token: &BlacklistedToken) -> Result<bool, AppError>;

    /// Check whether a token ID has been revoked.
    async fn is_blacklisted(&self, jti: &str) -> Result<bool, AppError>;

    /// Drop entries whose token has expired anyway. Returns rows removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}
