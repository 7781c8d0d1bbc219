use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse profile file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid profile entry: {0}")]
    InvalidProfile(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
