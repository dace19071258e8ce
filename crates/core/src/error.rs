use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidaskError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{path} is not a regular file")]
    NotAFile { path: PathBuf },

    #[error("Request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Response is not valid JSON: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Endpoint answered with status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Response did not contain an answer")]
    MissingAnswer,

    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Invalid configuration in {origin}: {reason}")]
    ConfigError { origin: String, reason: String },
}

pub type Result<T> = std::result::Result<T, VidaskError>;
