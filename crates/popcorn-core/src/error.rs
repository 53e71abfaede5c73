use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("saved state error: {0}")]
    State(String),

    #[error("invalid movie record: {0}")]
    Record(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
