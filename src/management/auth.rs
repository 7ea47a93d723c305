use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No stored token. Please run weatherbeats auth ({0})")]
    NotAuthenticated(String),

    #[error("Token refresh failed: {0}")]
    Refresh(String),
}

/// Source of bearer tokens for Web API calls.
///
/// Clients hold one of these instead of reading a token from global state.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns a token that is valid for at least the next API call.
    async fn get_valid_token(&self) -> Result<String, AuthError>;
}

/// A fixed, pre-issued bearer token. Never refreshed.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self(access_token.into())
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn get_valid_token(&self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}

/// Persisted PKCE token with transparent refresh.
pub struct TokenManager {
    token: Mutex<Token>,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token: Mutex::new(token),
        }
    }

    pub async fn load() -> Result<Self, AuthError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| AuthError::NotAuthenticated(e.to_string()))?;
        let token: Token = serde_json::from_str(&content)
            .map_err(|e| AuthError::NotAuthenticated(e.to_string()))?;
        Ok(Self::new(token))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let token = self.token.lock().await.clone();
        Self::write(&token).await
    }

    async fn write(token: &Token) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("weatherbeats/cache/token.json");
        path
    }
}

/// True once `now` is within [`EXPIRY_MARGIN_SECS`] of the token's expiry.
pub fn is_expired(token: &Token, now: u64) -> bool {
    let expires_at = token.obtained_at + token.expires_in;
    now >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
}

#[async_trait]
impl CredentialProvider for TokenManager {
    async fn get_valid_token(&self) -> Result<String, AuthError> {
        let mut token = self.token.lock().await;
        let now = Utc::now().timestamp() as u64;

        if is_expired(&token, now) {
            let refreshed = spotify::auth::refresh_token(&token.refresh_token)
                .await
                .map_err(AuthError::Refresh)?;
            *token = refreshed;
            if let Err(e) = Self::write(&token).await {
                tracing::warn!(error = %e, "failed to persist refreshed token");
            }
        }

        Ok(token.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            scope: String::new(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn token_expires_ahead_of_time() {
        let t = token(1_000, 3_600);
        assert!(!is_expired(&t, 1_000));
        assert!(!is_expired(&t, 4_359));
        assert!(is_expired(&t, 4_360));
    }

    #[test]
    fn short_lived_token_does_not_underflow() {
        let t = token(0, 60);
        assert!(is_expired(&t, 0));
    }

    #[tokio::test]
    async fn fresh_token_is_used_without_refresh() {
        let now = Utc::now().timestamp() as u64;
        let manager = TokenManager::new(token(now, 3_600));
        assert_eq!(manager.get_valid_token().await.unwrap(), "access");
    }

    #[tokio::test]
    async fn static_token_is_returned_as_is() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.get_valid_token().await.unwrap(), "abc");
    }
}
