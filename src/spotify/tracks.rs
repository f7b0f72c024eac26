use crate::{
    Res,
    management::CacheStore,
    spotify::{
        SpotifyApi,
        genres::{approximate_genres, get_artist_genres},
        requests::request_audio_features,
    },
    types::{RecommendationParams, Seeds, Track, TrackRecord},
    utils,
};

/// Numeric audio features exposed by the audio-features endpoint.
pub const DEFAULT_AUDIO_KEYS: &[&str] = &[
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "duration_ms",
    "time_signature",
];

/// Recommendations requested per batch when a track itself seeds the genre
/// approximation.
const TRACK_SEED_LIMIT: u32 = 50;

pub fn default_audio_keys() -> Vec<String> {
    DEFAULT_AUDIO_KEYS.iter().map(|k| k.to_string()).collect()
}

/// Builds the flat record of a track.
///
/// Genres come from the track's artists. When none of them yields any, the
/// track itself seeds a genre approximation. A track left without genres is
/// kept with an empty list; see [`TrackRecord::missing_genres_report`].
pub async fn cleaned_track_data<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    track: &Track,
    audio_keys: &[String],
) -> Res<TrackRecord> {
    let artists: Vec<String> = track.artists.iter().map(|a| a.name.clone()).collect();
    let artists_id: Vec<String> = track.artists.iter().map(|a| a.id.clone()).collect();

    let audio_features = request_audio_features(client, cache, &track.id, audio_keys).await?;

    let mut genres = get_artist_genres(client, cache, &artists_id).await?;
    if genres.is_empty() {
        genres = approximate_genres(
            client,
            cache,
            &Seeds::track(&track.id),
            &RecommendationParams::default().with_limit(TRACK_SEED_LIMIT),
        )
        .await?;
    }

    Ok(TrackRecord {
        spotify_id: track.id.clone(),
        title: track.name.clone(),
        artists,
        artists_id,
        genres: utils::sorted_unique(genres),
        popularity: track.popularity,
        audio_features,
    })
}
