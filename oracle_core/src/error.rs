use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Invalid wallet address: {0}")]
    InvalidWallet(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Generation error: {0}")]
    Generation(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<sled::Error> for OracleError {
    fn from(err: sled::Error) -> Self {
        OracleError::Persistence(err.to_string())
    }
}

pub type OracleResult<T> = Result<T, OracleError>;
