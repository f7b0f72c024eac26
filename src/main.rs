use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use genremap::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Assemble track records with genres and audio features
    Tracks(TracksOptions),

    /// Genres of artists, approximated when Spotify has none
    Genres(GenresOptions),

    /// Artists similar to seed artists/tracks
    Similar(SeedOptions),

    /// Approximate genres from artists similar to seed artists/tracks
    Approximate(SeedOptions),

    /// Scrape the genre map page of a genre
    GenrePage(GenrePageOptions),

    /// Filter the rows of a JSON table by contained values
    Filter(FilterOptions),

    /// Handle the call cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Spotify track ids
    #[clap(required_unless_present = "playlist")]
    pub ids: Vec<String>,

    /// JSON file with an array of playlist items (`added_at`, `track`)
    #[clap(long)]
    pub playlist: Option<PathBuf>,

    /// Audio feature to include; can be repeated (default: all numeric features)
    #[clap(long = "audio-key")]
    pub audio_keys: Vec<String>,

    /// Print records as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenresOptions {
    /// Spotify artist ids
    #[clap(required = true)]
    pub artist_ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SeedOptions {
    /// Seed artist id; can be repeated
    #[clap(long = "artist")]
    pub artists: Vec<String>,

    /// Seed track id; can be repeated
    #[clap(long = "track")]
    pub tracks: Vec<String>,

    /// Tracks per recommendation request
    #[clap(long)]
    pub limit: Option<u32>,

    /// Number of recommendation requests (default: number of CPU cores)
    #[clap(long)]
    pub repeat: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenrePageOptions {
    /// Spotify genre name
    pub genre: String,

    /// Print the page data as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FilterOptions {
    /// JSON file with `columns` and `rows`
    pub path: PathBuf,

    /// Value to look for; can be repeated
    #[clap(long = "value", required = true)]
    pub values: Vec<String>,

    /// Require every value instead of any
    #[clap(long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Remove every cached result
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Tracks(opt) => cli::tracks(opt.ids, opt.playlist, opt.audio_keys, opt.json).await,
        Command::Genres(opt) => cli::genres(opt.artist_ids).await,
        Command::Similar(opt) => cli::similar(opt.artists, opt.tracks, opt.limit, opt.repeat).await,
        Command::Approximate(opt) => {
            cli::approximate(opt.artists, opt.tracks, opt.limit, opt.repeat).await
        }
        Command::GenrePage(opt) => cli::genre_page(opt.genre, opt.json).await,
        Command::Filter(opt) => cli::filter(opt.path, opt.values, opt.all).await,
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::Clear => cli::clear_cache().await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
