//! Error types for the board host and its desktop hooks.

use thiserror::Error;

/// Failures of a desktop integration call.
///
/// None of these abort startup. The lifecycle turns each one into a single
/// diagnostic line and moves on.
#[derive(Error, Debug)]
pub enum DesktopError {
    /// The OS or the current session does not offer the capability
    #[error("{capability} is not supported: {reason}")]
    Unsupported {
        capability: &'static str,
        reason: String,
    },

    /// The platform refused the operation
    #[error("{capability} was denied: {reason}")]
    SecurityDenied {
        capability: &'static str,
        reason: String,
    },

    /// The URL built from the configured port does not parse
    #[error("Malformed URL {url}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The browser launcher could not be started or exited with failure
    #[error("Failed to open browser: {0}")]
    Launch(std::io::Error),

    /// The bundled icon exists but is not a decodable image
    #[error("Invalid icon image: {0}")]
    InvalidImage(String),

    #[error("Failed to read resource: {0}")]
    Io(#[from] std::io::Error),
}

impl DesktopError {
    pub fn unsupported(capability: &'static str, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            capability,
            reason: reason.into(),
        }
    }

    pub fn denied(capability: &'static str, reason: impl Into<String>) -> Self {
        Self::SecurityDenied {
            capability,
            reason: reason.into(),
        }
    }
}

/// Fatal host startup failures. Hook failures never end up here.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to initialize app data directory: {0}")]
    DataDir(std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid server port {0:?}")]
    Port(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Web server failed: {0}")]
    Serve(std::io::Error),
}
