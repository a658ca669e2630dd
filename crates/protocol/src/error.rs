//! Protocol error types

use thiserror::Error;

/// Errors raised while speaking the devlist exchange
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Peer answered with a reply code other than the one the request expects
    #[error("unexpected reply code {actual:#06x} (expected {expected:#06x})")]
    UnexpectedReply { expected: u16, actual: u16 },

    /// Stream ended inside a fixed-size record
    #[error("truncated stream while reading {record} ({expected} bytes expected)")]
    Truncated {
        record: &'static str,
        expected: usize,
    },

    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for protocol results
pub type Result<T> = std::result::Result<T, ProtocolError>;
