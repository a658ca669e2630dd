//! Common error types

use std::path::PathBuf;
use thiserror::Error;

/// Discovery failures surfaced to the caller
#[derive(Debug, Error)]
pub enum Error {
    /// Remote host could not be reached
    #[error("unable to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Devlist exchange failed
    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    /// Local device registry could not be opened
    #[error("device registry {} unavailable: {source}", .path.display())]
    RegistryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-device attribute was missing or unreadable
    #[error("cannot read attribute {attribute} of {busid}: {source}")]
    Attribute {
        busid: String,
        attribute: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
