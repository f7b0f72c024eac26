use std::{collections::BTreeSet, fmt, path::Path, thread};

use crate::{
    Res,
    types::{PlaylistItem, Track},
};

/// Maximum number of ids accepted by the several-tracks endpoint.
pub const MAX_TRACKS_PER_REQUEST: usize = 50;

#[derive(Debug, PartialEq, Eq)]
pub enum ChunkError {
    InvalidChunkSize,
    MissingElements { expected: usize, found: usize },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::InvalidChunkSize => write!(f, "chunk size must be greater than zero"),
            ChunkError::MissingElements { expected, found } => write!(
                f,
                "missing elements in chunked lists: expected {}, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ChunkError {}

/// Splits `items` into contiguous chunks of at most `max_items` elements.
///
/// The chunks are checked to cover the input exactly before being returned.
pub fn chunk_list<T: Clone>(items: &[T], max_items: usize) -> Result<Vec<Vec<T>>, ChunkError> {
    if max_items == 0 {
        return Err(ChunkError::InvalidChunkSize);
    }

    let chunks: Vec<Vec<T>> = items.chunks(max_items).map(|c| c.to_vec()).collect();

    let found: usize = chunks.iter().map(|c| c.len()).sum();
    if found != items.len() {
        return Err(ChunkError::MissingElements {
            expected: items.len(),
            found,
        });
    }
    Ok(chunks)
}

/// Default number of repeated recommendation requests: one per available core.
pub fn default_repeat() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Extracts the track objects from playlist items.
pub fn tracks_from_playlist(items: Vec<PlaylistItem>) -> Vec<Track> {
    items.into_iter().map(|item| item.track).collect()
}

/// Reads the tracks of a JSON file holding an array of playlist items.
pub async fn read_playlist(path: &Path) -> Res<Vec<Track>> {
    let content = async_fs::read_to_string(path).await?;
    let items: Vec<PlaylistItem> = serde_json::from_str(&content)?;
    Ok(tracks_from_playlist(items))
}

/// Deduplicates and sorts labels lexicographically.
pub fn sorted_unique<I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    labels
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
