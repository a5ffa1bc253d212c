//! Application-level command handling.
//!
//! Turns a [`Command`] into the text shown to the user. Transport, cache and
//! resolver are passed in so a run can be driven with any [`SecureTransport`].

pub mod url;

use log::info;

use crate::cache::ResultCache;
use crate::config::{Command, Config};
use crate::error_handling::Error;
use crate::fetch::{RedirectResolver, SecureTransport};
use crate::html::render_page;
use crate::search::search;

pub use url::parse_target;

/// Fetches `url` (following redirects) and renders the page as text.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] for bad input, otherwise the fetch error.
pub fn fetch_page<T: SecureTransport>(
    url: &str,
    resolver: &RedirectResolver<T>,
) -> Result<String, Error> {
    let target = parse_target(url)?;
    info!("Fetching {target}");
    let response = resolver.fetch_target(target)?;
    Ok(render_page(&response.text()))
}

/// Searches `query` and formats the links as a numbered list.
///
/// # Errors
///
/// Returns the search error; the cache is left untouched in that case.
pub fn search_links<T: SecureTransport>(
    query: &str,
    resolver: &RedirectResolver<T>,
    cache: &mut ResultCache,
    config: &Config,
) -> Result<String, Error> {
    let links = search(query, resolver, cache, &config.search_host)?;
    if links.is_empty() {
        return Ok("No results found.\n".to_string());
    }
    Ok(links
        .iter()
        .enumerate()
        .map(|(index, link)| format!("{}. {link}\n", index + 1))
        .collect())
}

/// Runs one command.
///
/// The cache is opened only for searches, so fetching a URL never touches it.
///
/// # Errors
///
/// Any failure of the command, for the caller to print.
pub fn run<T: SecureTransport>(
    command: &Command,
    resolver: &RedirectResolver<T>,
    config: &Config,
) -> Result<String, Error> {
    match command {
        Command::Fetch(url) => fetch_page(url, resolver),
        Command::Search(query) => {
            let mut cache = ResultCache::open(&config.cache_path)?;
            search_links(query, resolver, &mut cache, config)
        }
    }
}
