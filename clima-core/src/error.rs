use thiserror::Error;

/// Failures while acquiring the input of a fetch cycle (a location fix).
///
/// These surface as alerts and never replace a screen's displayed data:
/// they happen before the screen transitions to `Loading`.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission not granted")]
    PermissionDenied,

    #[error("location service unavailable: {0}")]
    Unavailable(String),

    #[error("location lookup failed: {0}")]
    Lookup(#[from] reqwest::Error),
}

/// Failures of the single HTTP round trip of a fetch cycle.
///
/// None of these is retried; recovery is always user-initiated.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered 404, which for city queries means the name
    /// matched nothing.
    #[error("city not found")]
    CityNotFound,

    #[error("provider returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed forecast timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}
