use std::borrow::Cow;

use axum::http::request::Parts;

use crate::error::{Error, RedirectType};

/// Fallback for every unmatched route. `/dashboard/` redirects to
/// `/dashboard`, anything else is a 404.
pub async fn strip_trailing_slashes(parts: Parts) -> Result<(), Error> {
    let path = parts.uri.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let location = match parts.uri.query() {
            Some(query) => format!("{trimmed}?{query}"),
            None => trimmed.to_string(),
        };
        return Err(Error::Redirect(
            RedirectType::Permanent,
            Cow::Owned(location),
        ));
    }

    Err(Error::NotFound)
}
