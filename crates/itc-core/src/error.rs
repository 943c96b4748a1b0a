use thiserror::Error;

/// The main error type for itc-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// The server answered with a non-2xx status
  #[error("Transport error: HTTP {status}")]
  Transport {
    /// HTTP status code returned by the Reporter service
    status: u16,
    /// Raw response body, usually an `<Error>` XML document
    body: String,
  },

  /// The request could not be sent or its body could not be read
  #[error("HTTP error: {0}")]
  Http(String),

  /// Malformed or unexpected XML, TSV, gzip or date content
  #[error("Decode error: {0}")]
  Decode(String),

  /// Missing or invalid credentials / settings
  #[error("Configuration error: {0}")]
  Configuration(String),

  /// Serialization/Deserialization error
  #[error("Serialization error")]
  Serde(#[from] serde_json::Error),
}

impl Error {
  /// Shorthand for a decode failure about a missing XML element or header
  pub fn missing(what: &str) -> Self {
    Error::Decode(format!("missing {what} in response"))
  }
}

/// Result type alias for itc-* crates
pub type Result<T> = std::result::Result<T, Error>;
