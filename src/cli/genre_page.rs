use tabled::Table;

use crate::{
    config,
    enao::{self, EnaoParser},
    error, info,
    types::{GenrePage, WeightedTableRow},
};

use super::{open_cache, spinner};

/// Prints the genre map data of `genre`, as a table or as JSON.
pub async fn genre_page(genre: String, json: bool) {
    let cache = open_cache().await;
    let host = config::enao_host();

    let pb = spinner(&format!("Scraping {}...", enao::genre_page_url(&host, &genre)));
    let result = enao::get_enao_genre_data(&cache, &EnaoParser, &host, &genre).await;
    pb.finish_and_clear();

    let page = match result {
        Ok(page) => page,
        Err(e) => error!("Failed to scrape genre page for '{}'. Err: {}", genre, e),
    };

    if json {
        match serde_json::to_string_pretty(&page) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize genre page. Err: {}", e),
        }
        return;
    }

    println!("{}", Table::new(weighted_rows(&page)));
    info!("Playlist: {}", page.spotify_url);
}

fn weighted_rows(page: &GenrePage) -> Vec<WeightedTableRow> {
    let sections = [
        ("similar", &page.sim_genres, &page.sim_weights),
        ("opposite", &page.opp_genres, &page.opp_weights),
        ("artist", &page.main_artists, &page.artists_weights),
    ];

    sections
        .into_iter()
        .flat_map(|(kind, names, weights)| {
            names.iter().zip(weights).map(move |(name, weight)| WeightedTableRow {
                kind: kind.to_string(),
                name: name.clone(),
                weight: *weight,
            })
        })
        .collect()
}
