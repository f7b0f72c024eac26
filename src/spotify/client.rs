use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    spotify::SpotifyApi,
    types::{
        Artist, AudioFeaturesResponse, RecommendationsResponse, Track, TracksResponse,
    },
    warning,
};

/// [`SpotifyApi`] over the Web API with reqwest.
///
/// Every call blocks its caller until the response is read; errors (network,
/// status or payload) are returned as is, without retries.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: String, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url,
            tokens: Mutex::new(tokens),
        }
    }

    /// Client on the configured API url with the persisted token, if any.
    pub async fn from_env() -> Self {
        Self::new(config::spotify_apiurl(), TokenManager::load().await)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Res<T> {
        let token = self.tokens.lock().await.get_valid_token().await?;

        let response = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

impl SpotifyApi for SpotifyClient {
    async fn tracks(&self, ids: &[String]) -> Res<Vec<Track>> {
        let res: TracksResponse = self.get("/tracks", &[("ids", ids.join(","))]).await?;

        let requested = res.tracks.len();
        let tracks: Vec<Track> = res.tracks.into_iter().flatten().collect();
        if tracks.len() < requested {
            warning!("Dropping {} unknown track ids", requested - tracks.len());
        }
        Ok(tracks)
    }

    async fn artist(&self, id: &str) -> Res<Artist> {
        self.get(&format!("/artists/{}", id), &[]).await
    }

    async fn audio_features(&self, id: &str) -> Res<Option<Map<String, Value>>> {
        let res: AudioFeaturesResponse = self
            .get("/audio-features", &[("ids", id.to_string())])
            .await?;
        Ok(res.audio_features.into_iter().next().flatten())
    }

    async fn recommendations(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        limit: u32,
    ) -> Res<Vec<Track>> {
        let mut query = vec![("limit", limit.to_string())];
        if !seed_artists.is_empty() {
            query.push(("seed_artists", seed_artists.join(",")));
        }
        if !seed_tracks.is_empty() {
            query.push(("seed_tracks", seed_tracks.join(",")));
        }

        let res: RecommendationsResponse = self.get("/recommendations", &query).await?;
        Ok(res.tracks)
    }
}
