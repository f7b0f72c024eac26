#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use genremap::{
    Res,
    management::CacheStore,
    spotify::SpotifyApi,
    types::{Artist, Track, TrackArtist},
};
use serde_json::{Map, Value, json};
use tempfile::TempDir;

pub fn track(id: &str, artist_ids: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artists: artist_ids
            .iter()
            .map(|a| TrackArtist {
                id: a.to_string(),
                name: format!("Artist {}", a),
            })
            .collect(),
        popularity: 42,
        uri: format!("spotify:track:{}", id),
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub async fn temp_cache() -> (TempDir, CacheStore) {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheStore::open(dir.path().join("cachedir")).await.unwrap();
    (dir, cache)
}

/// In-memory Spotify with call counters.
#[derive(Default)]
pub struct MockSpotify {
    genres: HashMap<String, Vec<String>>,
    recommendations: HashMap<String, Vec<Track>>,
    features: HashMap<String, Map<String, Value>>,
    pub track_calls: AtomicUsize,
    pub artist_calls: AtomicUsize,
    pub feature_calls: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub track_batches: Mutex<Vec<usize>>,
}

impl MockSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres(mut self, artist_id: &str, genres: &[&str]) -> Self {
        self.genres.insert(artist_id.to_string(), ids(genres));
        self
    }

    /// Recommendations served for any query whose first seed is `seed`.
    pub fn with_recommendations(mut self, seed: &str, tracks: Vec<Track>) -> Self {
        self.recommendations.insert(seed.to_string(), tracks);
        self
    }

    pub fn with_features(mut self, track_id: &str, features: Value) -> Self {
        if let Value::Object(map) = features {
            self.features.insert(track_id.to_string(), map);
        }
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl SpotifyApi for MockSpotify {
    async fn tracks(&self, ids: &[String]) -> Res<Vec<Track>> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        self.track_batches.lock().unwrap().push(ids.len());
        Ok(ids.iter().map(|id| track(id, &["artist-of-track"])).collect())
    }

    async fn artist(&self, id: &str) -> Res<Artist> {
        self.artist_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Artist {
            id: id.to_string(),
            name: format!("Artist {}", id),
            genres: self.genres.get(id).cloned().unwrap_or_default(),
        })
    }

    async fn audio_features(&self, id: &str) -> Res<Option<Map<String, Value>>> {
        self.feature_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.features.get(id).cloned())
    }

    async fn recommendations(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        _limit: u32,
    ) -> Res<Vec<Track>> {
        self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
        let first = seed_artists.iter().chain(seed_tracks).next();
        Ok(first
            .and_then(|seed| self.recommendations.get(seed))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn default_features() -> Value {
    json!({
        "id": "ignored",
        "danceability": 0.5,
        "energy": 0.8,
        "tempo": 120.0,
        "type": "audio_features"
    })
}
