use std::fmt;

use select::{
    document::Document,
    node::Node,
    predicate::{Class, Name, Predicate},
};

use crate::types::GenrePage;

#[derive(Debug, PartialEq, Eq)]
pub enum ScrapeError {
    MissingPlaylistLink,
    MissingAttribute { name: String, attribute: &'static str },
    InvalidWeight { name: String, style: String },
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::MissingPlaylistLink => write!(f, "genre page has no playlist link"),
            ScrapeError::MissingAttribute { name, attribute } => {
                write!(f, "element '{}' has no '{}' attribute", name, attribute)
            }
            ScrapeError::InvalidWeight { name, style } => {
                write!(f, "element '{}' has no weight in style '{}'", name, style)
            }
        }
    }
}

impl std::error::Error for ScrapeError {}

/// Extracts [`GenrePage`] data from the HTML of a genre page.
pub trait GenrePageParser {
    fn parse(&self, genre: &str, html: &str) -> Result<GenrePage, ScrapeError>;
}

/// Parser for the Every Noise at Once genre map pages.
///
/// Related genres are `div.genre` elements whose id contains `nearby`
/// (similar) or `mirror` (opposite); artists are `div.genre.scanme`. Each
/// element's weight is the last value of its inline style, a font-size
/// percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnaoParser;

impl GenrePageParser for EnaoParser {
    fn parse(&self, genre: &str, html: &str) -> Result<GenrePage, ScrapeError> {
        let document = Document::from(html);

        let spotify_url = document
            .find(Name("a"))
            .find(|a| a.text().trim() == "playlist")
            .and_then(|a| a.attr("href"))
            .map(|href| href.to_string())
            .ok_or(ScrapeError::MissingPlaylistLink)?;

        let mut page = GenrePage {
            genre: genre.to_string(),
            sim_genres: Vec::new(),
            sim_weights: Vec::new(),
            opp_genres: Vec::new(),
            opp_weights: Vec::new(),
            main_artists: Vec::new(),
            artists_weights: Vec::new(),
            spotify_url,
        };

        let related = Name("div").and(Class("genre")).and(Class("scanme").not());
        for node in document.find(related) {
            let name = display_name(&node);
            let weight = weight(&node, &name)?;
            let id = node.attr("id").ok_or_else(|| ScrapeError::MissingAttribute {
                name: name.clone(),
                attribute: "id",
            })?;

            if id.contains("nearby") {
                if name != genre {
                    page.sim_genres.push(name);
                    page.sim_weights.push(weight);
                }
            } else if id.contains("mirror") {
                page.opp_genres.push(name);
                page.opp_weights.push(weight);
            }
        }

        let artists = Name("div").and(Class("genre")).and(Class("scanme"));
        for node in document.find(artists) {
            let name = display_name(&node);
            let weight = weight(&node, &name)?;
            if !name.is_empty() {
                page.main_artists.push(name);
                page.artists_weights.push(weight);
            }
        }

        Ok(page)
    }
}

fn display_name(node: &Node) -> String {
    node.text().trim().replace('»', "").trim().to_string()
}

fn weight(node: &Node, name: &str) -> Result<u32, ScrapeError> {
    let style = node.attr("style").ok_or_else(|| ScrapeError::MissingAttribute {
        name: name.to_string(),
        attribute: "style",
    })?;

    style
        .split_whitespace()
        .last()
        .and_then(|last| last.trim_end_matches(';').replace('%', "").parse::<u32>().ok())
        .ok_or_else(|| ScrapeError::InvalidWeight {
            name: name.to_string(),
            style: style.to_string(),
        })
}
