// Error types for the disk client.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems with local configuration. All of them are raised before any
/// request leaves the process.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Token file does not exist
    #[error("token file {path:?} not found")]
    MissingTokenFile { path: PathBuf },

    /// Token file exists but holds only whitespace
    #[error("token file {path:?} is empty")]
    EmptyToken { path: PathBuf },

    /// Any other I/O failure while reading the token file
    #[error("failed to read token from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Token is blank
    #[error("token is empty")]
    BlankToken,

    /// Token cannot be sent in an Authorization header
    #[error("token contains characters not allowed in an HTTP header")]
    InvalidToken,
}

/// Main error type for the disk client.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network or protocol failure reported by the HTTP stack
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A polled folder never showed up in the listing
    #[error("folder '{name}' did not appear in the listing within {waited:?}")]
    Timeout { name: String, waited: Duration },
}
