//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::Error;
use crate::fetch::Target;

/// Validates a URL given on the command line and turns it into a target.
///
/// Adds an https:// prefix if missing, then checks that the URL is syntactically
/// valid, uses http/https and has a host. Rejects URLs longer than `MAX_URL_LENGTH`.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if the URL is too long, does not parse, or
/// uses an unsupported scheme.
pub fn parse_target(input: &str) -> Result<Target, Error> {
    let input = input.trim();

    if input.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            input.len(),
            MAX_URL_LENGTH
        );
        return Err(Error::InvalidUrl(format!(
            "{}... (longer than {MAX_URL_LENGTH} characters)",
            input.chars().take(50).collect::<String>()
        )));
    }

    // Normalize: add https:// prefix if missing
    let normalized = if has_scheme(input) {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let parsed = url::Url::parse(&normalized).map_err(|_| Error::InvalidUrl(input.to_string()))?;
    Target::from_url(&parsed).map_err(|_| Error::InvalidUrl(input.to_string()))
}

/// Whether `input` opens with `<scheme>://`. A `://` later in the path or
/// query (e.g. `?next=https://...`) does not count.
fn has_scheme(input: &str) -> bool {
    input
        .split_once("://")
        .is_some_and(|(scheme, _)| !scheme.is_empty() && !scheme.contains(['/', '?', '#']))
}
