use thiserror::Error;

/// Failure talking to a catalog or fetching a file from it.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} not found")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum FinderError {
    /// Raised before any network activity when the inputs select no mode.
    #[error("{0}")]
    Usage(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
