use thiserror::Error;

/// Errors returned by the weather client.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network or TLS failure, or a non-2xx response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("invalid weather base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
