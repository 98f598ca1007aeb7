//! Error types for chanorder.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {url} returned HTTP {status}")]
    Transport { url: String, status: u16 },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("SortIndex POST failed ({status}) for channel {channel_id} -> index {new_index}")]
    FatalWrite {
        channel_id: String,
        new_index: usize,
        status: u16,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this is a rejected index write.
    pub fn is_fatal_write(&self) -> bool {
        matches!(self, Error::FatalWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
