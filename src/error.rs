use thiserror::Error;

/// Reasons a query against a site endpoint can fail.
///
/// The panel treats every variant the same way: the result set is cleared, the
/// message becomes user-visible and the loading flag drops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("Please enter a site URL")]
    EmptyInput,
    #[error("Invalid URL: {0}")]
    MalformedUrl(String),
    #[error("{0}")]
    NetworkFailure(String),
    #[error("Invalid site.json schema")]
    SchemaViolation,
}

/// Failure at the transport seam, before any status or body is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

impl From<TransportError> for PanelError {
    fn from(e: TransportError) -> Self {
        PanelError::NetworkFailure(e.to_string())
    }
}
