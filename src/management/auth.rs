use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{Res, config, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Loads the cached token from `{data_dir}/cache/token.json`.
    ///
    /// Returns `Ok(None)` when no token has been cached yet. An unreadable or
    /// malformed token file is an error.
    pub async fn load() -> Res<Option<Self>> {
        Self::load_from(&Self::token_path()).await
    }

    pub async fn load_from(path: &Path) -> Res<Option<Self>> {
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("Failed to read {}: {}", path.display(), e).into()),
        };
        let token: Token = serde_json::from_str(&content)
            .map_err(|e| format!("Malformed token file {}: {}", path.display(), e))?;
        Ok(Some(Self { token }))
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&path, json).await?;
        Ok(())
    }

    /// Returns an access token that is valid for at least a few more minutes,
    /// refreshing and persisting it first if needed.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired() {
            let mut new_token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
