use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of entries in a movie's flat field list.
const FIELD_COUNT: usize = 4;

/// Display fields of one movie, as returned by the popular-movies endpoint.
///
/// Serialized as its flat field list (see [`Movie::to_fields`]) so a saved
/// list stays compact and order-stable across versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<String>>", into = "Vec<Option<String>>")]
pub struct Movie {
    poster_path: String,
    original_title: String,
    overview: Option<String>,
    title: Option<String>,
}

impl Movie {
    pub fn new(
        poster_path: impl Into<String>,
        original_title: impl Into<String>,
        overview: Option<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            poster_path: poster_path.into(),
            original_title: original_title.into(),
            overview,
            title,
        }
    }

    /// Poster image path, relative to the image CDN (e.g. `/abc.jpg`).
    pub fn poster_path(&self) -> &str {
        &self.poster_path
    }

    /// Title in the movie's original language.
    pub fn original_title(&self) -> &str {
        &self.original_title
    }

    /// Overview text in the requested display language.
    pub fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }

    /// Title in the requested display language.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Localized title when present, otherwise the original title.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.original_title)
    }

    /// Full poster URL for the given image base and size bucket (e.g. `w342`).
    pub fn poster_url(&self, image_base: &str, size: &str) -> String {
        let base = image_base.trim_end_matches('/');
        let path = self.poster_path.trim_start_matches('/');
        format!("{base}/{size}/{path}")
    }

    /// Flatten into the ordered field list:
    /// poster path, original title, overview, localized title.
    pub fn to_fields(&self) -> Vec<Option<String>> {
        vec![
            Some(self.poster_path.clone()),
            Some(self.original_title.clone()),
            self.overview.clone(),
            self.title.clone(),
        ]
    }

    /// Rebuild a movie from the field list produced by [`Movie::to_fields`].
    pub fn from_fields(fields: Vec<Option<String>>) -> Result<Self, CoreError> {
        if fields.len() != FIELD_COUNT {
            return Err(CoreError::Record(format!(
                "expected {FIELD_COUNT} fields, got {}",
                fields.len()
            )));
        }

        let mut fields = fields.into_iter();
        let poster_path = fields
            .next()
            .flatten()
            .ok_or_else(|| CoreError::Record("missing poster path".into()))?;
        let original_title = fields
            .next()
            .flatten()
            .ok_or_else(|| CoreError::Record("missing original title".into()))?;
        let overview = fields.next().flatten();
        let title = fields.next().flatten();

        Ok(Self {
            poster_path,
            original_title,
            overview,
            title,
        })
    }
}

impl From<Movie> for Vec<Option<String>> {
    fn from(movie: Movie) -> Self {
        vec![
            Some(movie.poster_path),
            Some(movie.original_title),
            movie.overview,
            movie.title,
        ]
    }
}

impl TryFrom<Vec<Option<String>>> for Movie {
    type Error = CoreError;

    fn try_from(fields: Vec<Option<String>>) -> Result<Self, Self::Error> {
        Movie::from_fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parasite() -> Movie {
        Movie::new(
            "/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg",
            "기생충",
            Some("All unemployed, Ki-taek's family...".into()),
            Some("Parasite".into()),
        )
    }

    #[test]
    fn test_fields_roundtrip() {
        let movies = [
            parasite(),
            Movie::new("/a.jpg", "Solaris", None, None),
            Movie::new("/b.jpg", "Stalker", Some(String::new()), None),
            Movie::new("", "", None, Some("Untitled".into())),
        ];
        for movie in movies {
            let restored = Movie::from_fields(movie.to_fields()).unwrap();
            assert_eq!(restored, movie);
        }
    }

    #[test]
    fn test_field_order() {
        let fields = parasite().to_fields();
        assert_eq!(
            fields[0].as_deref(),
            Some("/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg")
        );
        assert_eq!(fields[1].as_deref(), Some("기생충"));
        assert!(fields[2].as_deref().unwrap().starts_with("All unemployed"));
        assert_eq!(fields[3].as_deref(), Some("Parasite"));
    }

    #[test]
    fn test_from_fields_rejects_bad_input() {
        assert!(Movie::from_fields(vec![Some("/a.jpg".into())]).is_err());
        assert!(Movie::from_fields(vec![None, Some("Solaris".into()), None, None]).is_err());
        assert!(Movie::from_fields(vec![Some("/a.jpg".into()), None, None, None]).is_err());
    }

    #[test]
    fn test_serde_uses_field_list() {
        let json = serde_json::to_string(&Movie::new("/a.jpg", "Solaris", None, None)).unwrap();
        assert_eq!(json, r#"["/a.jpg","Solaris",null,null]"#);

        let movie: Movie = serde_json::from_str(&json).unwrap();
        assert_eq!(movie.original_title(), "Solaris");
        assert!(serde_json::from_str::<Movie>(r#"["/a.jpg"]"#).is_err());
    }

    #[test]
    fn test_display_title_and_poster_url() {
        let movie = parasite();
        assert_eq!(movie.display_title(), "Parasite");
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/", "w342"),
            "https://image.tmdb.org/t/p/w342/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg"
        );

        let untranslated = Movie::new("/a.jpg", "Solaris", None, None);
        assert_eq!(untranslated.display_title(), "Solaris");
    }
}
