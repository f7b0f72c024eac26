use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::types::Token;

/// Requests an app access token with the client-credentials grant.
///
/// The endpoints used by genremap (tracks, artists, audio features and
/// recommendations) carry no user data, so no user authorization is needed:
/// the client id and secret are exchanged directly for a bearer token.
///
/// # Arguments
///
/// * `token_url` - Spotify token endpoint
/// * `client_id` - Application client id
/// * `client_secret` - Application client secret
///
/// # Errors
///
/// Network failures, non-success statuses and responses without an
/// `access_token` are returned as error strings.
pub async fn request_client_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;
    token_from_json(&json)
}

fn token_from_json(json: &Value) -> Result<Token, String> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or("token response has no access_token")?;

    Ok(Token {
        access_token: access_token.to_string(),
        token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
