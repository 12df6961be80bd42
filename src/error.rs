use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("check-in failed: {0}")]
    CheckIn(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Api(err.to_string())
    }
}
