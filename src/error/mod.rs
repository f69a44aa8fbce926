pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the podcast directory or a feed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("search term cannot be empty")]
    EmptySearchTerm,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed search response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed feed: {0}")]
    Feed(#[from] rss::Error),
}
