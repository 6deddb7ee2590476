#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Network-level failure (DNS, connect, TLS, read), with the
    /// underlying message preserved.
    #[error("transport error: {0}")]
    Transport(String),
    /// Geolocation service answered with a non-2xx status.
    #[error("geolocation service returned HTTP {0}")]
    GeoStatus(u16),
    /// Geolocation service answered 2xx but reported a failed lookup.
    #[error("geolocation lookup failed: {0}")]
    GeoLookup(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
