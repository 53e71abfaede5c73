use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use popcorn_core::config::TmdbConfig;
use popcorn_core::loader::{LoadResult, PageLoader};

use super::error::TmdbError;
use super::types::{TmdbPageResponse, TmdbStatusResponse};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// The Movie Database v3 REST client.
pub struct TmdbClient {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl TmdbClient {
    /// Client against an explicit API root (e.g. `https://api.themoviedb.org/3/`).
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, TmdbError> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: parse_base(base_url)?,
            http: Client::new(),
        })
    }

    /// Client built from the `[tmdb]` config section.
    pub fn from_config(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: parse_base(&config.base_url)?,
            http,
        })
    }

    /// Host the client talks to, for connectivity probes.
    pub fn host(&self) -> Option<&str> {
        self.base_url.host_str()
    }

    pub fn port(&self) -> Option<u16> {
        self.base_url.port_or_known_default()
    }

    fn popular_url(&self, language: &str, page: u32) -> Result<Url, TmdbError> {
        let mut url = self.base_url.join("movie/popular")?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("language", language)
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Check the HTTP response for errors and return the status message on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TmdbStatusResponse>(&body)
                .ok()
                .and_then(|s| s.status_message)
                .unwrap_or(body);
            warn!(status, %message, "TMDB API error");
            Err(TmdbError::Api { status, message })
        }
    }

    /// Fetch one page (1-based) of the popular movies list.
    pub async fn popular_movies(
        &self,
        language: &str,
        page: u32,
    ) -> Result<TmdbPageResponse, TmdbError> {
        debug!(page, language, "Fetching popular movies");
        let resp = self.http.get(self.popular_url(language, page)?).send().await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

impl PageLoader for TmdbClient {
    async fn load_page(&self, language: &str, page: u32) -> LoadResult {
        match self.popular_movies(language, page).await {
            Ok(resp) => {
                debug!(
                    requested = page,
                    served = resp.page,
                    results = resp.results.len(),
                    "Popular movies received"
                );
                Ok(resp.into_movies())
            }
            Err(e) => {
                warn!(page, language, error = %e, "Failed to load popular movies");
                Err(e.kind())
            }
        }
    }
}

fn parse_base(base_url: &str) -> Result<Url, TmdbError> {
    let base_url = if base_url.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        base_url.trim()
    };
    // `Url::join` drops the last segment unless the base ends in a slash.
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{base_url}/"))?)
    }
}
