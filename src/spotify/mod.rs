//! # Spotify Integration Module
//!
//! This module provides genremap's view of the Spotify Web API: a narrow
//! client capability, memoized accessors built on top of it, the genre
//! approximation pipeline and the track record assembler.
//!
//! ## Architecture
//!
//! ```text
//! CLI
//!  ↓
//! Track assembler            (tracks)
//!  ↓
//! Genre pipeline             (genres)
//!  ↓
//! Cached accessors           (requests) ── CacheStore
//!  ↓
//! SpotifyApi capability      (client: reqwest, auth: client credentials)
//!  ↓
//! Spotify Web API
//! ```
//!
//! ## Client Boundary
//!
//! [`SpotifyApi`] is the only thing the rest of the crate knows about the
//! network. [`SpotifyClient`] implements it over HTTP; tests implement it
//! with canned responses. The client is never part of a cache key, so two
//! client instances share cached results.
//!
//! ## Genre Approximation
//!
//! Many artists have no genres on Spotify. For those, [`approximate_genres`]
//! asks for recommendations seeded by the artist (or track), collects the
//! artists of the recommended tracks, gathers their genres and keeps the
//! dominant ones with [`crate::stats::jenks_filter`]. Recommendations are
//! stochastic, so the request is repeated several times (one per CPU core by
//! default) and all results are kept, duplicates included.
//!
//! ## Error Types
//!
//! All functions return [`crate::Res`]; network, status and payload errors
//! propagate unchanged. There are no retries.
//!
//! ## API Coverage
//!
//! - `GET /tracks` - Several tracks by id (up to 50)
//! - `GET /artists/{id}` - Artist with its genres
//! - `GET /audio-features` - Audio features of a track
//! - `GET /recommendations` - Tracks similar to seed artists/tracks
//! - `POST /api/token` - Client-credentials token

use std::future::Future;

use serde_json::{Map, Value};

use crate::{
    Res,
    types::{Artist, Track},
};

pub mod auth;
mod client;
mod genres;
mod requests;
mod tracks;

pub use client::SpotifyClient;
pub use genres::approximate_genres;
pub use genres::get_artist_genres;
pub use genres::get_similar_artists;
pub use genres::get_single_artist_genres;
pub use requests::get_tracks_from_id;
pub use requests::request_artist_genre;
pub use requests::request_audio_features;
pub use requests::request_recommendations;
pub use requests::request_tracks;
pub use tracks::DEFAULT_AUDIO_KEYS;
pub use tracks::cleaned_track_data;
pub use tracks::default_audio_keys;

/// Spotify Web API operations used by genremap.
pub trait SpotifyApi {
    /// Track objects for `ids`, in request order.
    fn tracks(&self, ids: &[String]) -> impl Future<Output = Res<Vec<Track>>> + Send;

    /// Full artist object, genres included.
    fn artist(&self, id: &str) -> impl Future<Output = Res<Artist>> + Send;

    /// Audio features object of a track, `None` when Spotify has none.
    fn audio_features(
        &self,
        id: &str,
    ) -> impl Future<Output = Res<Option<Map<String, Value>>>> + Send;

    /// One batch of recommended tracks.
    fn recommendations(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        limit: u32,
    ) -> impl Future<Output = Res<Vec<Track>>> + Send;
}
