//! Drives a [`ListController`] against a [`PageLoader`].
//!
//! Loads run as tokio tasks; their results are applied to the controller
//! only from [`Session::next_completion`], so the controller is mutated from
//! a single context no matter how many pages are in flight.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::{Id, JoinSet};
use tracing::warn;

use crate::connectivity::Connectivity;
use crate::controller::{Completion, ListController, PageRequest};
use crate::loader::{LoadResult, PageLoader};
use crate::saved_state::SavedState;

pub struct Session<L> {
    controller: ListController,
    loader: Arc<L>,
    tasks: JoinSet<(PageRequest, LoadResult)>,
    /// Request behind each running task, for tasks that end without a result.
    requests: HashMap<Id, PageRequest>,
}

impl<L> Session<L>
where
    L: PageLoader + 'static,
{
    pub fn new(loader: L, controller: ListController) -> Self {
        Self {
            controller,
            loader: Arc::new(loader),
            tasks: JoinSet::new(),
            requests: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    /// Number of loads still running.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Enter the screen: restore `saved` if present, otherwise check
    /// connectivity and request the first page.
    pub fn start(&mut self, connectivity: &impl Connectivity, saved: Option<SavedState>) {
        match saved {
            Some(saved) => self.controller.restore(saved),
            None => {
                let request = self.controller.start(connectivity);
                self.dispatch(request);
            }
        }
    }

    /// Forward a scroll position; may start a load for the next page.
    pub fn scrolled(&mut self, last_visible: usize) {
        let request = self.controller.on_scrolled(last_visible);
        self.dispatch(request);
    }

    /// Forward the active display language. On a change, outstanding loads
    /// are aborted before page 1 is requested again.
    pub fn resumed(&mut self, language: &str) {
        if let Some(request) = self.controller.on_resume(language) {
            self.tasks.abort_all();
            self.dispatch(Some(request));
        }
    }

    /// Wait for the next load to finish and apply it.
    ///
    /// Returns `None` once no loads are outstanding.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        loop {
            match self.tasks.join_next_with_id().await? {
                Ok((id, (request, result))) => {
                    self.requests.remove(&id);
                    return Some(self.controller.on_load_finished(&request, result));
                }
                Err(e) => {
                    let request = self.requests.remove(&e.id());
                    if e.is_cancelled() {
                        continue;
                    }
                    warn!(error = %e, "Page load task failed");
                    if let Some(request) = request {
                        return Some(self.controller.on_load_aborted(&request));
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, request: Option<PageRequest>) {
        let Some(request) = request else {
            return;
        };
        let loader = Arc::clone(&self.loader);
        let tracked = request.clone();
        let handle = self.tasks.spawn(async move {
            let result = loader.load_page(&request.language, request.page).await;
            (request, result)
        });
        self.requests.insert(handle.id(), tracked);
    }
}
