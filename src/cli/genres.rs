use crate::{
    error, info,
    spotify::{self, SpotifyClient},
    success,
    types::{RecommendationParams, Seeds},
    warning,
};

use super::{open_cache, spinner};

/// Prints the genres of the given artists, approximated where Spotify has none.
pub async fn genres(artist_ids: Vec<String>) {
    let cache = open_cache().await;
    let client = SpotifyClient::from_env().await;

    let pb = spinner("Collecting artist genres...");
    let result = spotify::get_artist_genres(&client, &cache, &artist_ids).await;
    pb.finish_and_clear();

    match result {
        Ok(genres) => print_list("genres", &genres),
        Err(e) => error!("Failed to collect genres. Err: {}", e),
    }
}

/// Prints the artists similar to the seeds.
pub async fn similar(
    artists: Vec<String>,
    tracks: Vec<String>,
    limit: Option<u32>,
    repeat: Option<usize>,
) {
    let seeds = seeds_or_exit(artists, tracks);
    let params = params(limit, repeat);
    let cache = open_cache().await;
    let client = SpotifyClient::from_env().await;

    let pb = spinner("Requesting recommendations...");
    let result = spotify::get_similar_artists(&client, &cache, &seeds, &params).await;
    pb.finish_and_clear();

    match result {
        Ok(artists) => print_list("similar artists", &artists),
        Err(e) => error!("Failed to find similar artists. Err: {}", e),
    }
}

/// Prints the genres approximated from the artists similar to the seeds.
pub async fn approximate(
    artists: Vec<String>,
    tracks: Vec<String>,
    limit: Option<u32>,
    repeat: Option<usize>,
) {
    let seeds = seeds_or_exit(artists, tracks);
    let params = params(limit, repeat);
    let cache = open_cache().await;
    let client = SpotifyClient::from_env().await;

    let pb = spinner("Approximating genres...");
    let result = spotify::approximate_genres(&client, &cache, &seeds, &params).await;
    pb.finish_and_clear();

    match result {
        Ok(genres) => print_list("approximated genres", &genres),
        Err(e) => error!("Failed to approximate genres. Err: {}", e),
    }
}

fn seeds_or_exit(artists: Vec<String>, tracks: Vec<String>) -> Seeds {
    let seeds = Seeds::new(artists, tracks);
    if seeds.is_empty() {
        error!("At least one --artist or --track seed is required.");
    }
    seeds
}

fn params(limit: Option<u32>, repeat: Option<usize>) -> RecommendationParams {
    let defaults = RecommendationParams::default();
    RecommendationParams {
        limit: limit.unwrap_or(defaults.limit),
        repeat: repeat.unwrap_or(defaults.repeat),
    }
}

fn print_list(what: &str, items: &[String]) {
    if items.is_empty() {
        warning!("No {} found.", what);
        return;
    }

    for item in items {
        info!("{}", item);
    }
    success!("Found {} {}!", items.len(), what);
}
