//! Web search with memoized results.

use log::{debug, info};
use url::form_urlencoded;

use crate::cache::ResultCache;
use crate::config::MAX_SEARCH_RESULTS;
use crate::error_handling::Error;
use crate::fetch::{RedirectResolver, SecureTransport, StatusClass, Target};
use crate::html::extract_search_links;

/// Path of the results page for `query`.
pub fn search_path(query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("/search?q={encoded}")
}

/// Returns up to `MAX_SEARCH_RESULTS` result links for `query`.
///
/// A cached result is returned without any network activity. Otherwise the
/// results page is fetched from `search_host`, the links are extracted and
/// stored in `cache` before being returned. Failed searches leave the cache
/// untouched.
///
/// # Errors
///
/// Returns the fetch error, [`Error::UnexpectedStatus`] when the final
/// response is not a 2xx, or [`Error::Cache`] when the result cannot be saved.
pub fn search<T: SecureTransport>(
    query: &str,
    resolver: &RedirectResolver<T>,
    cache: &mut ResultCache,
    search_host: &str,
) -> Result<Vec<String>, Error> {
    if let Some(links) = cache.get(query) {
        info!("Cache hit for {query:?}");
        return Ok(links.to_vec());
    }
    debug!("Cache miss for {query:?}");

    let response = resolver.fetch_target(Target::new(search_host, search_path(query)))?;
    if response.status_class != StatusClass::Success {
        return Err(Error::UnexpectedStatus(response.status_code));
    }

    let mut links = extract_search_links(&response.text());
    links.truncate(MAX_SEARCH_RESULTS);
    info!("Found {} results for {query:?}", links.len());

    cache.put(query, links.clone())?;
    Ok(links)
}
