use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation backend returned {status}: {body}")]
    Backend { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
