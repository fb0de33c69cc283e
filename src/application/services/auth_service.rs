//! Authentication Service
//!
//! Issues and verifies JWT access/refresh token pairs and handles refresh
//! token revocation. Every operation has an `*_at` form taking the current
//! instant so lifetimes can be checked at exact boundaries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{BlacklistedToken, TokenBlacklistRepository, UserRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::password::PasswordManager;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token pair.
    async fn obtain_pair_at(
        &self,
        phone: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError>;

    /// Issue a new access token from a refresh token.
    async fn refresh_at(&self, refresh: &str, now: DateTime<Utc>) -> Result<String, AuthError>;

    /// Revoke a refresh token.
    async fn blacklist_at(&self, refresh: &str, now: DateTime<Utc>) -> Result<(), AuthError>;

    /// Validate an access token and return its user id.
    async fn authenticate_at(&self, access: &str, now: DateTime<Utc>) -> Result<i64, AuthError>;

    async fn obtain_pair(&self, phone: &str, password: &str) -> Result<TokenPair, AuthError> {
        self.obtain_pair_at(phone, password, Utc::now()).await
    }

    async fn refresh(&self, refresh: &str) -> Result<String, AuthError> {
        self.refresh_at(refresh, Utc::now()).await
    }

    async fn blacklist(&self, refresh: &str) -> Result<(), AuthError> {
        self.blacklist_at(refresh, Utc::now()).await
    }

    async fn authenticate(&self, access: &str) -> Result<i64, AuthError> {
        self.authenticate_at(access, Utc::now()).await
    }
}

/// Access and refresh tokens issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Which half of a pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID, the blacklist key
    pub jti: String,
    pub token_type: TokenKind,
}

impl Claims {
    fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Token is invalid or expired")]
    TokenExpired,

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Token is blacklisted")]
    Blacklisted,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Internal(msg) => AppError::Internal(msg),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U: ?Sized, B: ?Sized> {
    user_repo: Arc<U>,
    blacklist_repo: Arc<B>,
    passwords: PasswordManager,
    jwt_settings: JwtSettings,
}

impl<U, B> AuthServiceImpl<U, B>
where
    U: UserRepository + ?Sized,
    B: TokenBlacklistRepository + ?Sized,
{
    pub fn new(
        user_repo: Arc<U>,
        blacklist_repo: Arc<B>,
        passwords: PasswordManager,
        jwt_settings: JwtSettings,
    ) -> Self {
        Self {
            user_repo,
            blacklist_repo,
            passwords,
            jwt_settings,
        }
    }

    fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => Duration::minutes(self.jwt_settings.access_token_lifetime_minutes),
            TokenKind::Refresh => Duration::days(self.jwt_settings.refresh_token_lifetime_days),
        }
    }

    fn issue(&self, user_id: i64, kind: TokenKind, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.lifetime(kind)).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().simple().to_string(),
            token_type: kind,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        metrics::record_token_issued(kind.as_str());
        Ok(token)
    }

    /// Verify signature, expiry and kind of a token.
    fn decode_token(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthError> {
        // Expiry is checked against `now` below instead of the wall clock.
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?
        .claims;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }
        if claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Decode a refresh token and make sure it has not been revoked.
    async fn live_refresh_claims(&self, refresh: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let claims = self.decode_token(refresh, TokenKind::Refresh, now)?;

        let revoked = self
            .blacklist_repo
            .is_blacklisted(&claims.jti)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if revoked {
            return Err(AuthError::Blacklisted);
        }
        Ok(claims)
    }
}

#[async_trait]
impl<U, B> AuthService for AuthServiceImpl<U, B>
where
    U: UserRepository + ?Sized + 'static,
    B: TokenBlacklistRepository + ?Sized + 'static,
{
    async fn obtain_pair_at(
        &self,
        phone: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        let user = self
            .user_repo
            .find_by_phone(phone)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "Token pair issued");

        Ok(TokenPair {
            access: self.issue(user.id, TokenKind::Access, now)?,
            refresh: self.issue(user.id, TokenKind::Refresh, now)?,
        })
    }

    async fn refresh_at(&self, refresh: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = self.live_refresh_claims(refresh, now).await?;
        self.issue(claims.user_id()?, TokenKind::Access, now)
    }

    async fn blacklist_at(&self, refresh: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        let claims = self.live_refresh_claims(refresh, now).await?;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(AuthError::InvalidToken)?;
        let entry = BlacklistedToken {
            jti: claims.jti.clone(),
            user_id: claims.user_id()?,
            expires_at,
            blacklisted_at: now,
        };

        let inserted = self
            .blacklist_repo
            .blacklist(&entry)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !inserted {
            return Err(AuthError::Blacklisted);
        }

        tracing::info!(user_id = entry.user_id, jti = %entry.jti, "Refresh token blacklisted");
        Ok(())
    }

    async fn authenticate_at(&self, access: &str, now: DateTime<Utc>) -> Result<i64, AuthError> {
        self.decode_token(access, TokenKind::Access, now)?.user_id()
    }
}
