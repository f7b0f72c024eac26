use std::collections::{BTreeSet, HashSet};

use crate::{
    Res,
    management::CacheStore,
    spotify::{
        SpotifyApi,
        requests::{request_artist_genre, request_recommendations},
    },
    stats::{JenksOptions, jenks_filter},
    types::{RecommendationParams, Seeds},
};

/// Artists appearing in the recommendations for `seeds`, seeds excluded.
///
/// The ids are returned sorted. Empty seeds give no similar artists.
pub async fn get_similar_artists<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    seeds: &Seeds,
    params: &RecommendationParams,
) -> Res<Vec<String>> {
    if seeds.is_empty() {
        return Ok(Vec::new());
    }

    cache
        .get_or_compute(
            "get_similar_artists",
            &(seeds, params.limit, params.repeat),
            || similar_artists(client, cache, seeds, params),
        )
        .await
}

/// Dominant genres among the artists similar to `seeds`.
///
/// Used when Spotify has no genres for an artist or for all artists of a
/// track.
pub async fn approximate_genres<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    seeds: &Seeds,
    params: &RecommendationParams,
) -> Res<Vec<String>> {
    if seeds.is_empty() {
        return Ok(Vec::new());
    }

    cache
        .get_or_compute(
            "approximate_genres",
            &(seeds, params.limit, params.repeat),
            || similar_genres(client, cache, seeds, params),
        )
        .await
}

/// Genres of one artist, approximated from similar artists when Spotify has
/// none. May still be empty.
pub async fn get_single_artist_genres<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    artist_id: &str,
) -> Res<Vec<String>> {
    let genres = request_artist_genre(client, cache, artist_id).await?;
    if !genres.is_empty() {
        return Ok(genres);
    }

    approximate_genres(
        client,
        cache,
        &Seeds::artist(artist_id),
        &RecommendationParams::default(),
    )
    .await
}

/// Sorted union of the genres of every artist in `artist_ids`.
pub async fn get_artist_genres<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    artist_ids: &[String],
) -> Res<Vec<String>> {
    let mut genres = BTreeSet::new();
    for artist_id in artist_ids {
        genres.extend(get_single_artist_genres(client, cache, artist_id).await?);
    }
    Ok(genres.into_iter().collect())
}

async fn similar_artists<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    seeds: &Seeds,
    params: &RecommendationParams,
) -> Res<Vec<String>> {
    let playlist = request_recommendations(client, cache, seeds, params).await?;

    let seed_ids: HashSet<&str> = seeds.ids().collect();
    let similar: BTreeSet<String> = playlist
        .into_iter()
        .flat_map(|track| track.artists)
        .map(|artist| artist.id)
        .filter(|id| !seed_ids.contains(id.as_str()))
        .collect();

    Ok(similar.into_iter().collect())
}

async fn similar_genres<C: SpotifyApi>(
    client: &C,
    cache: &CacheStore,
    seeds: &Seeds,
    params: &RecommendationParams,
) -> Res<Vec<String>> {
    let similar = get_similar_artists(client, cache, seeds, params).await?;
    if similar.is_empty() {
        return Ok(Vec::new());
    }

    let mut genres = Vec::new();
    for artist_id in &similar {
        genres.extend(request_artist_genre(client, cache, artist_id).await?);
    }

    Ok(jenks_filter(&genres, &JenksOptions::default())?)
}
