use thiserror::Error;

#[derive(Debug, Error)]
pub enum TubeFetchError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, TubeFetchError>;
