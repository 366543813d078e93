//! Errors raised while decoding a configuration reply.

use thiserror::Error;

/// Errors that can occur when decoding a `config get cluster` reply.
///
/// Every variant except [`Incomplete`](ProtocolError::Incomplete) means the
/// server sent bytes that violate the reply grammar. Nothing decoded before
/// the failure is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The buffer doesn't hold a complete reply yet.
    /// The caller should read more data and try again.
    #[error("incomplete reply: need more data")]
    Incomplete,

    /// The first line didn't start with `CONFIG`.
    #[error("expected reply to start with \"CONFIG\", got {actual:?}")]
    InvalidHeader { actual: String },

    /// The version line wasn't an unsigned decimal integer.
    #[error("invalid config version {0:?}")]
    InvalidVersion(String),

    /// The node list line was empty.
    #[error("node list is empty")]
    EmptyNodeList,

    /// A node descriptor didn't split into exactly host, ip and port.
    #[error("expected 3 '|'-separated fields in node descriptor {descriptor:?}, got {fields}")]
    InvalidNodeFields { descriptor: String, fields: usize },

    /// A node's port wasn't an integer in 1..=65535.
    #[error("invalid port {port:?} in node descriptor {descriptor:?}")]
    InvalidPort { descriptor: String, port: String },

    /// A line that must be text contained invalid UTF-8.
    #[error("invalid utf-8 in {0}")]
    InvalidUtf8(&'static str),

    /// The final line didn't match the terminal marker.
    #[error("expected {expected:?}, got {actual:?}")]
    InvalidTerminator { expected: String, actual: String },

    /// A line grew past the maximum length without a terminator.
    #[error("line exceeds {0} bytes without a terminator")]
    LineTooLong(usize),
}
