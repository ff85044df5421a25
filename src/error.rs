use thiserror::Error;

/// Failures surfaced to callers. Markup irregularities never end up here;
/// extraction absorbs them with defaults or dropped records.
#[derive(Debug, Error)]
pub enum Error {
    /// The requester gave up after exhausting its retry budget.
    #[error("request to {url} failed after {attempts} attempt(s): {reason}")]
    Fetch { url: String, attempts: u32, reason: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The identifier carries no known source prefix.
    #[error("unknown source for manga id `{0}`")]
    UnknownSource(String),

    /// The HTTP client could not be constructed from the configuration.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Routing failures are data-integrity errors and must not be retried.
    pub fn is_routing(&self) -> bool {
        matches!(self, Error::UnknownSource(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
