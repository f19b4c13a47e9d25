//! Error types for spectrumctl

use std::time::Duration;
use thiserror::Error;

/// Result type alias for spectrumctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Cloudflare API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `spectrumctl init` or set CLOUDFLARE_API_TOKEN.")]
    Unauthorized,

    #[error("Access denied. The API credentials lack permission for this zone.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the remote object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `spectrumctl init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "Cloudflare credentials not configured. Set CLOUDFLARE_API_TOKEN (or CLOUDFLARE_EMAIL and CLOUDFLARE_API_KEY), or run `spectrumctl init`."
    )]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Errors raised while reconciling a Spectrum application resource
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A remote call failed; `context` names the operation, zone and id.
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to find id in Create response; resource was empty")]
    EmptyResource,

    #[error("invalid id (\"{0}\") specified, should be in format \"zoneName/applicationID\"")]
    InvalidImportId(String),

    #[error("error finding zoneName {zone_name:?}: {source}")]
    ZoneLookup {
        zone_name: String,
        #[source]
        source: ApiError,
    },

    #[error("resource has no id; create or import it first")]
    MissingId,

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("cannot set {field}: {reason}")]
    FieldWrite { field: String, reason: String },
}

impl ResourceError {
    pub(crate) fn remote(context: impl Into<String>, source: ApiError) -> Self {
        ResourceError::Remote {
            context: context.into(),
            source,
        }
    }
}
