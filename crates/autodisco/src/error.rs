//! Error types for a discovery poll.

use std::time::Duration;

use autodisco_protocol::ProtocolError;

/// Broad category of a [`DiscoveryError`].
///
/// Lets callers tell an unreachable or truncating endpoint apart from one
/// that answered with garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dial failed or timed out.
    Connection,
    /// The request couldn't be written after connecting.
    Transport,
    /// The reply couldn't be read in full.
    Read,
    /// The reply violated the wire grammar.
    Decode,
}

/// Errors that can occur while polling a configuration endpoint.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out connecting to {endpoint} after {timeout:?}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    #[error("failed to send request: {0}")]
    Transport(#[source] std::io::Error),

    #[error("failed to read reply: {0}")]
    Read(#[source] std::io::Error),

    #[error("endpoint closed the connection before the reply was complete")]
    Disconnected,

    #[error("timed out waiting for reply after {0:?}")]
    ReadTimeout(Duration),

    #[error("malformed reply: {0}")]
    Decode(#[from] ProtocolError),
}

impl DiscoveryError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiscoveryError::Connect { .. } | DiscoveryError::ConnectTimeout { .. } => {
                ErrorKind::Connection
            }
            DiscoveryError::Transport(_) => ErrorKind::Transport,
            DiscoveryError::Read(_)
            | DiscoveryError::Disconnected
            | DiscoveryError::ReadTimeout(_) => ErrorKind::Read,
            DiscoveryError::Decode(_) => ErrorKind::Decode,
        }
    }
}
