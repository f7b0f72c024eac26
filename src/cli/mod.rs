//! # CLI Module
//!
//! This module provides the command-line layer of genremap. Each command
//! opens the call cache, builds a Spotify client from the environment when it
//! needs one, runs a library operation and presents the result.
//!
//! ## Commands
//!
//! - [`tracks`] - Assembles flat track records (genres and audio features)
//! - [`genres`] - Genres of artists, approximated when Spotify has none
//! - [`similar`] - Artists similar to seed artists/tracks
//! - [`approximate`] - Genre approximation for seed artists/tracks
//! - [`genre_page`] - Scraped genre map data for a genre
//! - [`filter`] - Containment filter over a JSON table
//! - [`clear_cache`] - Removes every cached call result
//!
//! ## Error Handling
//!
//! Library errors are fatal here: they are printed with the `error!` macro,
//! which exits the process. Long operations show a spinner that is cleared
//! before any output.
//!
//! ## Usage Patterns
//!
//! ```bash
//! genremap tracks 4uLU6hMCjMI75M1A2tKUQC --audio-key energy --audio-key tempo
//! genremap tracks --playlist items.json --json | jq '.[].genres'
//! genremap genres 0OdUWJ0sBjDrqHygGUXeCF
//! genremap approximate --artist 0OdUWJ0sBjDrqHygGUXeCF --repeat 4
//! genremap genre-page "dream pop"
//! genremap filter table.json --value rock --value pop
//! genremap cache clear
//! ```

mod cache;
mod filter;
mod genre_page;
mod genres;
mod tracks;

pub use cache::clear_cache;
pub use filter::filter;
pub use genre_page::genre_page;
pub use genres::approximate;
pub use genres::genres;
pub use genres::similar;
pub use tracks::tracks;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config, error, management::CacheStore};

async fn open_cache() -> CacheStore {
    let location = config::cache_dir();
    match CacheStore::open(&location).await {
        Ok(cache) => cache,
        Err(e) => error!("Cannot open cache at {}. Err: {}", location.display(), e),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
