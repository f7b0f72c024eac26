use std::collections::BTreeMap;

use crate::{
    Res,
    management::CacheStore,
    spotify::SpotifyApi,
    types::{RecommendationParams, Seeds, Track},
    utils::{self, MAX_TRACKS_PER_REQUEST},
};

/// Track objects for `tracks_id`, memoized on the ids.
pub async fn request_tracks<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    tracks_id: &[String],
) -> Res<Vec<Track>> {
    cache
        .get_or_compute("request_tracks", &(tracks_id,), || client.tracks(tracks_id))
        .await
}

/// Genres Spotify associates with an artist.
///
/// Many artists have none; an empty list is a valid answer.
pub async fn request_artist_genre<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    artist_id: &str,
) -> Res<Vec<String>> {
    cache
        .get_or_compute("request_artist_genre", &(artist_id,), || {
            fetch_artist_genres(client, artist_id)
        })
        .await
}

/// Values of `audio_keys` in the audio features of a track.
///
/// # Errors
///
/// Fails when the track has no audio features or when a requested key is
/// missing or not numeric.
pub async fn request_audio_features<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    track_id: &str,
    audio_keys: &[String],
) -> Res<BTreeMap<String, f64>> {
    cache
        .get_or_compute("request_audio_features", &(track_id, audio_keys), || {
            fetch_audio_features(client, track_id, audio_keys)
        })
        .await
}

/// Tracks recommended for `seeds`, requested `params.repeat` times.
///
/// Recommendations are stochastic; every batch is kept, so the same track
/// may appear several times.
pub async fn request_recommendations<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    seeds: &Seeds,
    params: &RecommendationParams,
) -> Res<Vec<Track>> {
    cache
        .get_or_compute(
            "request_recommendations",
            &(seeds, params.limit, params.repeat),
            || fetch_recommendations(client, seeds, params),
        )
        .await
}

/// Track objects for any number of ids, requested in batches of 50.
pub async fn get_tracks_from_id<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    tracks_id: &[String],
) -> Res<Vec<Track>> {
    let mut results = Vec::with_capacity(tracks_id.len());
    for chunk in utils::chunk_list(tracks_id, MAX_TRACKS_PER_REQUEST)? {
        results.extend(request_tracks(client, cache, &chunk).await?);
    }
    Ok(results)
}

async fn fetch_artist_genres<C: SpotifyApi>(client: &C, artist_id: &str) -> Res<Vec<String>> {
    Ok(client.artist(artist_id).await?.genres)
}

async fn fetch_audio_features<C: SpotifyApi>(
    client: &C,
    track_id: &str,
    audio_keys: &[String],
) -> Res<BTreeMap<String, f64>> {
    let features = client
        .audio_features(track_id)
        .await?
        .ok_or_else(|| format!("no audio features for track {}", track_id))?;

    let mut values = BTreeMap::new();
    for key in audio_keys {
        match features.get(key).and_then(|v| v.as_f64()) {
            Some(value) => {
                values.insert(key.clone(), value);
            }
            None => {
                return Err(format!(
                    "audio feature '{}' is missing or not numeric for track {}",
                    key, track_id
                )
                .into());
            }
        }
    }
    Ok(values)
}

async fn fetch_recommendations<C: SpotifyApi>(
    client: &C,
    seeds: &Seeds,
    params: &RecommendationParams,
) -> Res<Vec<Track>> {
    let mut result = Vec::new();
    for _ in 0..params.repeat {
        result.extend(
            client
                .recommendations(&seeds.artists, &seeds.tracks, params.limit)
                .await?,
        );
    }
    Ok(result)
}
