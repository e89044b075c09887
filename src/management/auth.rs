use std::path::PathBuf;

use chrono::Utc;

use crate::{error::SyncError, spotify, types::Token};

/// Persisted OAuth token with refresh-on-demand.
///
/// The token lives as JSON in the platform data directory. Consumers only
/// ever see a valid access token string; expiry tracking and refreshing
/// stay inside this type.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, SyncError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| SyncError::Auth(e.to_string()))?;
        let token: Token =
            serde_json::from_str(&content).map_err(|e| SyncError::Auth(e.to_string()))?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), SyncError> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| SyncError::Auth(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.token).map_err(|e| SyncError::Auth(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| SyncError::Auth(e.to_string()))
    }

    /// Returns a usable access token, refreshing and re-persisting first if
    /// the stored one is about to expire.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = spotify::auth::refresh_token(&self.token.refresh_token).await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    // Treat the token as expired 4 minutes early so in-flight runs never
    // cross the real expiry.
    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spomcli/cache/token.json");
        path
    }
}
