use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrieverError>;

#[derive(Error, Debug)]
pub enum RetrieverError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Index parse error: {0}")]
    IndexError(#[from] serde_json::Error),
}
