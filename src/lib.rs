//! Spotify Genre Mapping Library
//!
//! This library fetches, caches and aggregates track metadata from the Spotify
//! Web API and the "Every Noise at Once" genre map. Its centerpiece is the genre
//! approximation pipeline: when Spotify has no genres for an artist, genres are
//! borrowed from similar artists found through recommendations and filtered
//! with a natural-breaks frequency cut.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `enao` - Every Noise at Once genre page scraper
//! - `management` - Token handling and the persisted call cache
//! - `spotify` - Spotify Web API client, cached accessors and genre pipeline
//! - `stats` - Jenks natural breaks and the frequency filter built on it
//! - `table` - Tabular containment filters
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use genremap::{config, management::CacheStore, spotify};
//!
//! #[tokio::main]
//! async fn main() -> genremap::Res<()> {
//!     config::load_env().await?;
//!     let cache = CacheStore::open(config::cache_dir()).await?;
//!     let client = spotify::SpotifyClient::from_env().await;
//!     let genres = spotify::get_artist_genres(&client, &cache, &["4NHQUGzhtTLFvgF5SZesLK".to_string()]).await?;
//!     println!("{:?}", genres);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod enao;
pub mod management;
pub mod spotify;
pub mod stats;
pub mod table;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. Module specific errors
/// (`ChunkError`, `StatsError`, `CacheError`, ...) convert into it with `?`.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates, including the "no genre found" report of the track
/// assembler.
///
/// # Example
///
/// ```
/// info!("Fetching {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Cache cleared");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It is only used by the command-line layer; library
/// code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark on stderr.
///
/// Used for recoverable issues, such as a cache entry that could not be
/// read back and is recomputed. Warnings stay off stdout so machine
/// readable output (`--json`) can be piped.
///
/// # Example
///
/// ```
/// warning!("Dropping {} unknown track ids", count);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
