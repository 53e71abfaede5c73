use popcorn_core::loader::LoadError;
use thiserror::Error;

/// Errors from the TMDB API client.
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

impl TmdbError {
    /// Collapse into the kind the list controller understands.
    pub fn kind(&self) -> LoadError {
        match self {
            Self::Http(e) if e.is_decode() => LoadError::ParseError,
            Self::Http(_) => LoadError::NoInternet,
            Self::Api { .. } => LoadError::ServerError,
            Self::Parse(_) => LoadError::ParseError,
            Self::Url(_) => LoadError::Generic,
        }
    }
}

impl From<TmdbError> for LoadError {
    fn from(e: TmdbError) -> Self {
        e.kind()
    }
}
