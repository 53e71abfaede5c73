//! Paginated list state: which movies are shown, which page comes next,
//! and what the display surface should render.
//!
//! The controller never performs I/O. Operations that need a page return a
//! [`PageRequest`]; the caller runs the load and hands the request back to
//! [`ListController::on_load_finished`] together with its result.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::GeneralConfig;
use crate::connectivity::Connectivity;
use crate::loader::{LoadError, LoadResult};
use crate::models::Movie;
use crate::saved_state::SavedState;

/// Movies per API page; fixed by the server.
pub const PAGE_SIZE: usize = 20;

/// Prefetch when the last visible item is this close to the loaded end.
pub const DEFAULT_PREFETCH_DISTANCE: usize = 5;

/// What the display surface should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Content,
    Error(LoadError),
}

/// A page load the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub language: String,
    /// Controller generation at issue time; completions from an older
    /// generation are discarded.
    pub generation: u64,
}

/// How a completion affected the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Movies were added to the list.
    Appended { added: usize },
    /// The list was replaced after a language change.
    Replaced { count: usize },
    /// The load failed or returned nothing; now showing an error.
    Failed(LoadError),
    /// The request belonged to a superseded generation and was ignored.
    Stale,
}

/// Owns the accumulated movie list and its paging state.
#[derive(Debug)]
pub struct ListController {
    movies: Vec<Movie>,
    page: u32,
    state: DisplayState,
    /// Language of the most recent load.
    language: String,
    language_changed: bool,
    generation: u64,
    /// Pages requested in the current generation and not yet completed.
    /// The counter only grows within a generation, so a page is never
    /// issued twice; the set records what is outstanding.
    in_flight: BTreeSet<u32>,
    /// Whether the last completed load reached the server successfully.
    online: bool,
    prefetch_distance: usize,
}

impl ListController {
    pub fn new(language: impl Into<String>) -> Self {
        Self::with_prefetch_distance(language, DEFAULT_PREFETCH_DISTANCE)
    }

    pub fn from_config(language: impl Into<String>, general: &GeneralConfig) -> Self {
        Self::with_prefetch_distance(language, general.prefetch_distance)
    }

    pub fn with_prefetch_distance(language: impl Into<String>, prefetch_distance: usize) -> Self {
        Self {
            movies: Vec::new(),
            page: 1,
            state: DisplayState::Loading,
            language: language.into(),
            language_changed: false,
            generation: 0,
            in_flight: BTreeSet::new(),
            online: false,
            prefetch_distance: prefetch_distance.min(PAGE_SIZE),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Pages requested but not yet completed in the current generation.
    pub fn in_flight(&self) -> impl Iterator<Item = u32> + '_ {
        self.in_flight.iter().copied()
    }

    // ── Lifecycle ─────────────────────────────────────────────────

    /// Enter the screen without a saved list.
    ///
    /// Offline: shows [`LoadError::NoInternet`] and requests nothing.
    /// Online: shows the loading indicator and requests page 1.
    pub fn start(&mut self, connectivity: &impl Connectivity) -> Option<PageRequest> {
        self.state = DisplayState::Loading;
        if !connectivity.is_online() {
            info!("Offline at start, not loading");
            self.online = false;
            self.state = DisplayState::Error(LoadError::NoInternet);
            return None;
        }
        self.online = true;
        Some(self.issue(self.page))
    }

    /// Re-enter the screen from a saved list; no network request is made.
    ///
    /// The saved language (if any) becomes the "last loaded" language so a
    /// later [`ListController::on_resume`] can detect a locale change.
    pub fn restore(&mut self, saved: SavedState) {
        info!(
            movies = saved.movies.len(),
            page = saved.page,
            "Restoring saved list"
        );
        self.movies = saved.movies;
        self.page = saved.page.max(1);
        if let Some(language) = saved.language {
            self.language = language;
        }
        self.language_changed = false;
        self.in_flight.clear();
        self.online = true;
        self.state = DisplayState::Content;
    }

    /// Snapshot for suspend/resume. Only taken when there is something to
    /// show and the last load succeeded.
    pub fn saved_state(&self) -> Option<SavedState> {
        if self.movies.is_empty() || !self.online {
            return None;
        }
        Some(SavedState {
            movies: self.movies.clone(),
            page: self.page,
            language: Some(self.language.clone()),
        })
    }

    // ── Events ────────────────────────────────────────────────────

    /// Apply the result of a previously issued request.
    pub fn on_load_finished(&mut self, request: &PageRequest, result: LoadResult) -> Completion {
        if request.generation != self.generation {
            debug!(
                page = request.page,
                generation = request.generation,
                current = self.generation,
                "Discarding stale page"
            );
            return Completion::Stale;
        }
        self.in_flight.remove(&request.page);

        let movies = match result {
            Ok(movies) => movies,
            Err(kind) => {
                warn!(page = request.page, error = %kind, "Page load failed");
                self.online = false;
                self.state = DisplayState::Error(kind);
                return Completion::Failed(kind);
            }
        };
        self.online = true;

        if movies.is_empty() {
            warn!(page = request.page, "Page load returned no movies");
            self.state = DisplayState::Error(LoadError::Generic);
            return Completion::Failed(LoadError::Generic);
        }

        let completion = if self.language_changed {
            let count = movies.len();
            self.movies = movies;
            self.language_changed = false;
            info!(page = request.page, count, language = %self.language, "Replaced list");
            Completion::Replaced { count }
        } else {
            // Arrival order, not page order.
            let added = movies.len();
            self.movies.extend(movies);
            debug!(page = request.page, added, total = self.movies.len(), "Appended page");
            Completion::Appended { added }
        };
        self.state = DisplayState::Content;
        completion
    }

    /// A load ended without a result (its task panicked). Treated like an
    /// empty answer so the screen does not stay on the loading indicator.
    pub fn on_load_aborted(&mut self, request: &PageRequest) -> Completion {
        self.on_load_finished(request, Err(LoadError::Generic))
    }

    /// React to the list being scrolled so that `last_visible` (0-based) is
    /// the last item on screen.
    pub fn on_scrolled(&mut self, last_visible: usize) -> Option<PageRequest> {
        let loaded_end = self.page as usize * PAGE_SIZE;
        if last_visible < loaded_end.saturating_sub(self.prefetch_distance) {
            return None;
        }

        let next = self.page + 1;
        self.page = next;
        Some(self.issue(next))
    }

    /// Called when the screen becomes visible again with the active display
    /// language. A different language retires every in-flight request and
    /// reloads from page 1; the next successful page replaces the list.
    pub fn on_resume(&mut self, current_language: &str) -> Option<PageRequest> {
        if current_language == self.language {
            return None;
        }
        info!(from = %self.language, to = %current_language, "Display language changed");

        self.generation += 1;
        self.in_flight.clear();
        self.language = current_language.to_string();
        self.language_changed = true;
        self.page = 1;
        Some(self.issue(1))
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.in_flight.insert(page);
        debug!(page, language = %self.language, generation = self.generation, "Requesting page");
        PageRequest {
            page,
            language: self.language.clone(),
            generation: self.generation,
        }
    }
}
