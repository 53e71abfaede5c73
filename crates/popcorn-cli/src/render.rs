//! Terminal display surface: turns controller state into printable text.

use std::fmt::Write as _;

use popcorn_core::controller::{Completion, DisplayState, ListController};
use popcorn_core::models::Movie;

const OVERVIEW_WIDTH: usize = 100;

/// Incremental renderer; only prints movies that are new since the last frame.
pub struct Renderer {
    shown: usize,
    last_state: Option<DisplayState>,
    poster_base: Option<(String, String)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            shown: 0,
            last_state: None,
            poster_base: None,
        }
    }

    /// Print a poster URL per movie, built from the image CDN base and size.
    pub fn with_posters(mut self, image_base: &str, size: &str) -> Self {
        self.poster_base = Some((image_base.to_string(), size.to_string()));
        self
    }

    /// Text for the current state, given what the last completion did.
    pub fn frame(&mut self, controller: &ListController, completion: Option<Completion>) -> String {
        let mut out = String::new();
        let state = controller.state();
        let changed = self.last_state != Some(state);
        self.last_state = Some(state);

        match state {
            DisplayState::Loading => {
                if changed {
                    out.push_str("Loading popular movies...\n");
                }
            }
            DisplayState::Error(kind) => {
                if changed || matches!(completion, Some(Completion::Failed(_))) {
                    let _ = writeln!(out, "! {kind}");
                }
            }
            DisplayState::Content => {
                if matches!(completion, Some(Completion::Replaced { .. }))
                    || controller.movies().len() < self.shown
                {
                    self.shown = 0;
                    let _ = writeln!(out, "== Popular movies ({}) ==", controller.language());
                }
                for (index, movie) in controller.movies().iter().enumerate().skip(self.shown) {
                    self.write_movie(&mut out, index, movie);
                }
                self.shown = controller.movies().len();
            }
        }
        out
    }

    fn write_movie(&self, out: &mut String, index: usize, movie: &Movie) {
        let title = movie.display_title();
        if title == movie.original_title() {
            let _ = writeln!(out, "{:>4}. {title}", index + 1);
        } else {
            let _ = writeln!(out, "{:>4}. {title} ({})", index + 1, movie.original_title());
        }
        if let Some(overview) = movie.overview() {
            let _ = writeln!(out, "      {}", truncate(overview, OVERVIEW_WIDTH));
        }
        if let Some((base, size)) = &self.poster_base {
            let _ = writeln!(out, "      {}", movie.poster_url(base, size));
        }
    }
}

/// Shorten to `max` characters, ending in an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use popcorn_core::loader::LoadError;

    use super::*;

    fn movie(n: u32) -> Movie {
        Movie::new(format!("/{n}.jpg"), format!("Movie {n}"), None, None)
    }

    #[test]
    fn test_loading_then_content_prints_incrementally() {
        let mut controller = ListController::new("en");
        let mut renderer = Renderer::new();

        let first = controller.start(&true).unwrap();
        assert_eq!(renderer.frame(&controller, None), "Loading popular movies...\n");
        assert_eq!(renderer.frame(&controller, None), "");

        let completion = controller.on_load_finished(&first, Ok(vec![movie(1), movie(2)]));
        let frame = renderer.frame(&controller, Some(completion));
        assert_eq!(frame, "   1. Movie 1\n   2. Movie 2\n");

        let second = controller.on_scrolled(15).unwrap();
        let completion = controller.on_load_finished(&second, Ok(vec![movie(3)]));
        assert_eq!(renderer.frame(&controller, Some(completion)), "   3. Movie 3\n");
    }

    #[test]
    fn test_error_message() {
        let mut controller = ListController::new("en");
        controller.start(&false);
        let mut renderer = Renderer::new();
        assert_eq!(renderer.frame(&controller, None), "! No internet connection\n");
    }

    #[test]
    fn test_replaced_list_reprints() {
        let mut controller = ListController::new("en");
        let mut renderer = Renderer::new();
        let first = controller.start(&true).unwrap();
        let completion = controller.on_load_finished(&first, Ok(vec![movie(1)]));
        renderer.frame(&controller, Some(completion));

        let reload = controller.on_resume("ru").unwrap();
        let localized = Movie::new("/9.jpg", "Movie 9", Some("Описание".into()), Some("Фильм 9".into()));
        let completion = controller.on_load_finished(&reload, Ok(vec![localized]));
        let frame = renderer.frame(&controller, Some(completion));
        assert_eq!(
            frame,
            "== Popular movies (ru) ==\n   1. Фильм 9 (Movie 9)\n      Описание\n"
        );
    }

    #[test]
    fn test_posters_and_failure_after_content() {
        let mut controller = ListController::new("en");
        let mut renderer = Renderer::new().with_posters("https://image.tmdb.org/t/p/", "w92");
        let first = controller.start(&true).unwrap();
        let completion = controller.on_load_finished(&first, Ok(vec![movie(1)]));
        assert_eq!(
            renderer.frame(&controller, Some(completion)),
            "   1. Movie 1\n      https://image.tmdb.org/t/p/w92/1.jpg\n"
        );

        let next = controller.on_scrolled(15).unwrap();
        let completion = controller.on_load_finished(&next, Err(LoadError::ServerError));
        assert_eq!(
            renderer.frame(&controller, Some(completion)),
            "! The server could not handle the request\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("абвгдежзий", 5), "абвг…");
    }
}
