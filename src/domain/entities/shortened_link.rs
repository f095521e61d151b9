//! Result of a successful shortening.

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
}
