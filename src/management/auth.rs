use std::path::PathBuf;

use chrono::Utc;

use crate::{config, spotify::auth::request_client_token, types::Token};

/// Seconds before expiry at which a token is considered stale.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Option<Token>,
}

impl TokenManager {
    /// Loads the persisted token; a missing or unreadable token file yields
    /// an empty manager that requests a token on first use.
    pub async fn load() -> Self {
        let path = Self::token_path();
        let token = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<Token>(&content).ok(),
            Err(_) => None,
        };
        Self { token }
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(Self::token_path(), json)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        match &self.token {
            Some(token) if !Self::is_expired(token) => Ok(token.access_token.clone()),
            _ => {
                let token = request_client_token(
                    &config::spotify_apitoken_url(),
                    &config::spotify_client_id()?,
                    &config::spotify_client_secret()?,
                )
                .await?;
                let access_token = token.access_token.clone();
                self.token = Some(token);
                let _ = self.persist().await;
                Ok(access_token)
            }
        }
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= token.obtained_at + token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "abc".to_string(),
            token_type: "Bearer".to_string(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn test_fresh_token_is_not_expired() {
        let now = Utc::now().timestamp() as u64;
        assert!(!TokenManager::is_expired(&token(now, 3600)));
    }

    #[test]
    fn test_token_close_to_expiry_is_expired() {
        let now = Utc::now().timestamp() as u64;
        assert!(TokenManager::is_expired(&token(now - 3500, 3600)));
        assert!(TokenManager::is_expired(&token(0, 3600)));
    }
}
