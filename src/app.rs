use tokio::sync::watch;

use crate::fetcher::{FetchState, RepoFetcher};
use crate::github::RepoSource;
use crate::input::InputController;
use crate::view::{self, ViewLine};

/// The username box wired to its fetcher.
///
/// `handle_input` is the only place that reacts to a username change, so a
/// keystroke schedules exactly one lookup.
#[derive(Debug)]
pub struct App<S> {
    input: InputController,
    fetcher: RepoFetcher<S>,
}

impl<S: RepoSource> App<S> {
    pub fn new(fetcher: RepoFetcher<S>) -> Self {
        Self {
            input: InputController::default(),
            fetcher,
        }
    }

    /// Feed a raw input value. Returns whether a lookup was (re)scheduled
    /// or cleared.
    pub fn handle_input(&mut self, raw: &str) -> bool {
        if !self.input.on_input(raw) {
            return false;
        }
        self.fetcher.request_for(self.input.value());
        true
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.input.value()
    }

    #[must_use]
    pub const fn fetcher(&self) -> &RepoFetcher<S> {
        &self.fetcher
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.fetcher.subscribe()
    }

    /// Current render lines for the username box and its results
    #[must_use]
    pub fn view(&self) -> Vec<ViewLine> {
        view::view_lines(self.input.value(), &self.fetcher.state())
    }

    /// Wait for the pending lookup to conclude, then render
    pub async fn settled_view(&self) -> Vec<ViewLine> {
        let state = self.fetcher.settled().await;
        view::view_lines(self.input.value(), &state)
    }
}
