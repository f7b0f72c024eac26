use std::path::PathBuf;

use tabled::Table;

use crate::{
    error, info,
    spotify::{self, SpotifyClient},
    success,
    types::{Track, TrackRecord, TrackTableRow},
    utils,
};

use super::{open_cache, spinner};

/// Builds and prints the flat record of every track in `ids` and in the
/// `playlist` file.
///
/// Tracks are fetched in batches of 50, then each one is assembled with its
/// audio features and genres. The playlist file holds a JSON array of
/// playlist items (`added_at`, `track`) whose tracks are used as is. Without
/// `audio_keys`, every numeric audio feature is requested. With `json`, only
/// the records are printed, as a JSON array (audio features are only part of
/// the JSON output).
pub async fn tracks(
    ids: Vec<String>,
    playlist: Option<PathBuf>,
    audio_keys: Vec<String>,
    json: bool,
) {
    let cache = open_cache().await;
    let client = SpotifyClient::from_env().await;
    let audio_keys = if audio_keys.is_empty() {
        spotify::default_audio_keys()
    } else {
        audio_keys
    };

    let mut tracks: Vec<Track> = match &playlist {
        Some(path) => match utils::read_playlist(path).await {
            Ok(tracks) => tracks,
            Err(e) => error!("Cannot read playlist {}. Err: {}", path.display(), e),
        },
        None => Vec::new(),
    };

    let pb = spinner("Fetching tracks...");
    match spotify::get_tracks_from_id(&client, &cache, &ids).await {
        Ok(fetched) => tracks.extend(fetched),
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch tracks. Err: {}", e);
        }
    }

    let mut records: Vec<TrackRecord> = Vec::with_capacity(tracks.len());
    for (i, track) in tracks.iter().enumerate() {
        pb.set_message(format!(
            "Assembling track {}/{}: {}",
            i + 1,
            tracks.len(),
            track.name
        ));
        match spotify::cleaned_track_data(&client, &cache, track, &audio_keys).await {
            Ok(record) => records.push(record),
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to assemble track {}. Err: {}", track.id, e);
            }
        }
    }
    pb.finish_and_clear();

    if json {
        match serde_json::to_string_pretty(&records) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize tracks. Err: {}", e),
        }
        return;
    }

    for report in records.iter().filter_map(TrackRecord::missing_genres_report) {
        info!("{}", report);
    }

    let rows: Vec<TrackTableRow> = records.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));

    success!("Assembled {} tracks!", records.len());
}
