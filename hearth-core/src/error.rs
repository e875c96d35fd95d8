use thiserror::Error;

#[derive(Error, Debug)]
pub enum HearthError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Data fetch failed: {0}")]
    DataFetch(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Message content is empty")]
    EmptyMessage,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HearthError>;
