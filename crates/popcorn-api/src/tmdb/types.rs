use serde::Deserialize;
use tracing::warn;

use popcorn_core::models::Movie;

// ── movie/popular response ──────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TmdbPageResponse {
    pub page: u32,
    pub results: Vec<TmdbMovie>,
}

/// One entry of a results list. Only the fields shown in the list are
/// read; the rest of the TMDB object is ignored.
#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub poster_path: Option<String>,
    pub original_title: String,
    pub overview: Option<String>,
    pub title: Option<String>,
}

/// Error body TMDB sends with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct TmdbStatusResponse {
    pub status_message: Option<String>,
}

// ── Conversions to shared types ─────────────────────────────────

impl TmdbMovie {
    /// `None` when the entry has no poster to show.
    pub fn into_movie(self) -> Option<Movie> {
        let poster_path = non_empty(self.poster_path)?;
        Some(Movie::new(
            poster_path,
            self.original_title,
            non_empty(self.overview),
            non_empty(self.title),
        ))
    }
}

impl TmdbPageResponse {
    /// Movies in server order. Entries without a poster are skipped.
    pub fn into_movies(self) -> Vec<Movie> {
        let page = self.page;
        self.results
            .into_iter()
            .filter_map(|entry| {
                let title = entry.original_title.clone();
                let movie = entry.into_movie();
                if movie.is_none() {
                    warn!(page, %title, "Skipping movie without poster");
                }
                movie
            })
            .collect()
    }
}

/// TMDB sends `""` for untranslated fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_popular_page() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "adult": false,
                    "backdrop_path": "/xJHokMbljvjADYdit5fK5VQsXEG.jpg",
                    "genre_ids": [12, 18, 878],
                    "id": 157336,
                    "original_language": "en",
                    "original_title": "Interstellar",
                    "overview": "Группа исследователей...",
                    "popularity": 140.2,
                    "poster_path": "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
                    "release_date": "2014-11-05",
                    "title": "Интерстеллар",
                    "video": false,
                    "vote_average": 8.4,
                    "vote_count": 32000
                },
                {
                    "id": 1,
                    "original_title": "Amélie",
                    "overview": "",
                    "poster_path": "/a.jpg",
                    "title": ""
                }
            ],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let resp: TmdbPageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.page, 1);

        let movies = resp.into_movies();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].original_title(), "Interstellar");
        assert_eq!(movies[0].title(), Some("Интерстеллар"));
        assert_eq!(movies[0].poster_path(), "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg");
        assert_eq!(movies[1].original_title(), "Amélie");
        assert!(movies[1].overview().is_none());
        assert!(movies[1].title().is_none());
    }

    #[test]
    fn test_entries_without_poster_are_skipped() {
        let json = r#"{
            "page": 7,
            "results": [
                { "original_title": "Before", "poster_path": "/before.jpg" },
                { "original_title": "Null", "poster_path": null },
                { "original_title": "Missing" },
                { "original_title": "Blank", "poster_path": "" },
                { "original_title": "After", "poster_path": "/after.jpg" }
            ],
            "total_pages": 500
        }"#;
        let resp: TmdbPageResponse = serde_json::from_str(json).unwrap();

        let titles: Vec<String> = resp
            .into_movies()
            .iter()
            .map(|m| m.original_title().to_string())
            .collect();
        assert_eq!(titles, vec!["Before", "After"]);
    }

    #[test]
    fn test_page_of_posterless_entries_is_empty() {
        let json = r#"{ "page": 2, "results": [{ "original_title": "X", "poster_path": null }] }"#;
        let resp: TmdbPageResponse = serde_json::from_str(json).unwrap();
        assert!(resp.into_movies().is_empty());
    }

    #[test]
    fn test_missing_required_fields_fail() {
        let no_title = r#"{ "page": 1, "results": [{ "poster_path": "/a.jpg" }] }"#;
        assert!(serde_json::from_str::<TmdbPageResponse>(no_title).is_err());

        let no_results = r#"{ "page": 1 }"#;
        assert!(serde_json::from_str::<TmdbPageResponse>(no_results).is_err());
    }

    #[test]
    fn test_deserialize_status_body() {
        let json = r#"{ "status_code": 7, "status_message": "Invalid API key", "success": false }"#;
        let resp: TmdbStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status_message.as_deref(), Some("Invalid API key"));
    }
}
