use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset load failed: {0}")]
    Load(String),

    #[error("Service request failed: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, Error>;
