//! Error types shared by all session backends

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("cookie error: {0}")]
    Cookie(String),

    #[error("key generation failed: {0}")]
    KeyGen(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
