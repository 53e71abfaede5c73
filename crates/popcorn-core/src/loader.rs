//! The page-loading seam between the list controller and a movie source.
//!
//! A loader performs exactly one request per call and reports either the
//! page's movies or the kind of failure. It never retries and never caches.

use std::future::Future;

use thiserror::Error;

use crate::models::Movie;

/// Why a page load did not produce movies.
///
/// The `Display` text is what the display surface shows to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No connectivity at start, or the request never reached the server.
    #[error("No internet connection")]
    NoInternet,

    /// The server answered with a non-success status.
    #[error("The server could not handle the request")]
    ServerError,

    /// The response body did not match the expected schema.
    #[error("Could not read the server response")]
    ParseError,

    /// The server answered successfully but with no movies.
    #[error("No movies to show")]
    Generic,
}

/// Outcome of one page load.
pub type LoadResult = Result<Vec<Movie>, LoadError>;

/// A source of popular-movie pages.
pub trait PageLoader: Send + Sync {
    /// Fetch one page (1-based) of movies localized to `language`,
    /// preserving the order the source returned them in.
    fn load_page(&self, language: &str, page: u32) -> impl Future<Output = LoadResult> + Send;
}
