//! Destination URL checks
//!
//! Every destination a link can route to (original URL, variant, geo,
//! device, post-expiry redirect) must be an absolute http(s) URL with a host.

use std::fmt;

use url::Url;

/// Why a destination URL was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlRejection {
    Blank,
    /// Parsed, but the scheme is not http or https (`javascript`, `ftp`, ...)
    UnsupportedScheme(String),
    MissingHost,
    Malformed(url::ParseError),
}

impl fmt::Display for UrlRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("URL cannot be empty"),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported scheme '{}': use http:// or https://", scheme)
            }
            Self::MissingHost => f.write_str("URL has no host"),
            Self::Malformed(e) => write!(f, "Malformed URL: {}", e),
        }
    }
}

impl std::error::Error for UrlRejection {}

/// Parse a destination URL, ignoring surrounding whitespace.
pub fn parse_destination(raw: &str) -> Result<Url, UrlRejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlRejection::Blank);
    }

    let url = Url::parse(raw).map_err(UrlRejection::Malformed)?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlRejection::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlRejection::MissingHost);
    }
    Ok(url)
}

pub fn is_valid_http_url(raw: &str) -> bool {
    parse_destination(raw).is_ok()
}
