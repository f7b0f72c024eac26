use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksResponse {
    pub tracks: Vec<Option<Track>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<serde_json::Map<String, serde_json::Value>>>,
}

/// Entry of a playlist page as returned by the Web API (`added_at`, `track`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Track,
}

/// Artist and track ids anchoring a recommendation query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seeds {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
}

impl Seeds {
    pub fn new(artists: Vec<String>, tracks: Vec<String>) -> Self {
        Seeds { artists, tracks }
    }

    pub fn artist(artist_id: &str) -> Self {
        Seeds::new(vec![artist_id.to_string()], Vec::new())
    }

    pub fn track(track_id: &str) -> Self {
        Seeds::new(Vec::new(), vec![track_id.to_string()])
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.tracks.is_empty()
    }

    /// Every seed id, artists first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.artists.iter().chain(self.tracks.iter()).map(String::as_str)
    }
}

/// Size of each recommendation request and how many times it is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationParams {
    pub limit: u32,
    pub repeat: usize,
}

impl RecommendationParams {
    pub fn with_limit(self, limit: u32) -> Self {
        RecommendationParams { limit, ..self }
    }
}

impl Default for RecommendationParams {
    fn default() -> Self {
        RecommendationParams {
            limit: 10,
            repeat: utils::default_repeat(),
        }
    }
}

/// Flat description of a track: metadata, genres and requested audio features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub spotify_id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub artists_id: Vec<String>,
    pub genres: Vec<String>,
    pub popularity: u32,
    #[serde(flatten)]
    pub audio_features: BTreeMap<String, f64>,
}

impl TrackRecord {
    /// Report line for a track that ended up without any genre.
    pub fn missing_genres_report(&self) -> Option<String> {
        if !self.genres.is_empty() {
            return None;
        }
        Some(format!(
            "Could not find related genres for the track: '{}' (id: '{}')",
            self.title, self.spotify_id
        ))
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub title: String,
    pub artists: String,
    pub genres: String,
    pub popularity: u32,
}

impl From<&TrackRecord> for TrackTableRow {
    fn from(record: &TrackRecord) -> Self {
        TrackTableRow {
            id: record.spotify_id.clone(),
            title: record.title.clone(),
            artists: record.artists.join(", "),
            genres: record.genres.join(", "),
            popularity: record.popularity,
        }
    }
}

/// Data scraped from a genre map page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenrePage {
    pub genre: String,
    pub sim_genres: Vec<String>,
    pub sim_weights: Vec<u32>,
    pub opp_genres: Vec<String>,
    pub opp_weights: Vec<u32>,
    pub main_artists: Vec<String>,
    pub artists_weights: Vec<u32>,
    pub spotify_url: String,
}

#[derive(Tabled)]
pub struct WeightedTableRow {
    pub kind: String,
    pub name: String,
    pub weight: u32,
}
