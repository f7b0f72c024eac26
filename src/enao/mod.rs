//! # Every Noise at Once scraper
//!
//! Fetches the genre map page of a Spotify genre and extracts its similar and
//! opposite genres and its representative artists, each with a weight.
//! Parsing goes through [`GenrePageParser`] so the page contract can change
//! without touching callers. HTTP and parse failures propagate; nothing is
//! retried.

mod parser;

pub use parser::EnaoParser;
pub use parser::GenrePageParser;
pub use parser::ScrapeError;

use crate::{Res, management::CacheStore, types::GenrePage};

/// Removes the characters that never appear in genre page names.
pub fn sanitize_genre(genre: &str) -> String {
    genre
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ':' | '\'' | '+' | '»' | '&' | '-'))
        .collect()
}

/// URL of the genre map page of `genre` on `host`.
pub fn genre_page_url(host: &str, genre: &str) -> String {
    format!(
        "http://{host}/engenremap-{genre}.html",
        host = host,
        genre = sanitize_genre(genre)
    )
}

/// Downloads a page body.
pub async fn fetch_page(url: &str) -> Res<String> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Scraped genre map data for `genre`, memoized on the host and genre.
pub async fn get_enao_genre_data<P: GenrePageParser>(
    cache: &CacheStore,
    parser: &P,
    host: &str,
    genre: &str,
) -> Res<GenrePage> {
    cache
        .get_or_compute("get_enao_genre_data", &(host, genre), || {
            scrape_genre_page(parser, host, genre)
        })
        .await
}

async fn scrape_genre_page<P: GenrePageParser>(
    parser: &P,
    host: &str,
    genre: &str,
) -> Res<GenrePage> {
    let html = fetch_page(&genre_page_url(host, genre)).await?;
    Ok(parser.parse(genre, &html)?)
}
