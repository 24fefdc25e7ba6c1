use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RetrieverError {
    #[error("Invalid address: {0} (must begin with \"http://\" or \"https://\")")]
    InvalidAddress(String),

    #[error("Cannot read resources larger than 2gb (declared length: {length} bytes)")]
    OversizedResource { length: u64 },

    #[error("Resource could not be loaded after {attempts} attempts")]
    RetrievalExhausted {
        attempts: u32,
        #[source]
        source: Box<RetrieverError>,
    },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Stream read error: {0}")]
    StreamRead(#[source] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {address}")]
    Status { status: u16, address: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Menu error: {0}")]
    Menu(String),
}

pub type Result<T> = std::result::Result<T, RetrieverError>;
