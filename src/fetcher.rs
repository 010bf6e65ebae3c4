use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::debounce::{DebounceMode, Debouncer};
use crate::github::RepoSource;
use crate::models::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested, or the username was cleared.
    #[default]
    Idle,
    /// A fetch is scheduled or in flight.
    Loading,
    /// The latest request has concluded, successfully or not.
    Settled,
}

/// Snapshot published to subscribers on every change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    username: String,
    repositories: Vec<Repository>,
    phase: Phase,
    seq: u64,
}

impl FetchState {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Monotonic id of the most recent `request_for` call
    #[must_use]
    pub const fn request_seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone)]
struct Request {
    username: String,
    seq: u64,
}

/// Debounced lookup of an account's repositories.
///
/// Failures of any kind settle to an empty list, which is indistinguishable
/// from an account with no public repositories.
pub struct RepoFetcher<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<FetchState>>,
    debouncer: Debouncer<Request>,
}

impl<S: RepoSource> RepoFetcher<S> {
    pub fn new(source: S, delay: Duration) -> Self {
        Self::with_mode(source, delay, DebounceMode::Trailing)
    }

    /// With [`DebounceMode::Immediate`] the leading and trailing runs of a
    /// burst share one request sequence: whichever answers last wins, and
    /// the trailing fetch runs while the state already reads as settled.
    pub fn with_mode(source: S, delay: Duration, mode: DebounceMode) -> Self {
        let source = Arc::new(source);
        let (sender, _) = watch::channel(FetchState::default());
        let state = Arc::new(sender);

        let debouncer = {
            let source = Arc::clone(&source);
            let state = Arc::clone(&state);
            Debouncer::new(delay, mode, move |request: Request| {
                run_fetch(Arc::clone(&source), Arc::clone(&state), request)
            })
        };

        Self {
            source,
            state,
            debouncer,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start (or restart) a lookup for `username`.
    ///
    /// The loading flag flips synchronously; the network is only touched once
    /// the debounce window passes without another call.
    pub fn request_for(&mut self, username: &str) {
        if username.is_empty() {
            self.debouncer.cancel();
            self.state.send_modify(|state| {
                state.seq += 1;
                state.username.clear();
                state.repositories.clear();
                state.phase = Phase::Idle;
            });
            tracing::debug!("username cleared");
            return;
        }

        let mut seq = 0;
        self.state.send_modify(|state| {
            state.seq += 1;
            seq = state.seq;
            username.clone_into(&mut state.username);
            state.phase = Phase::Loading;
        });
        tracing::debug!(username, seq, "lookup scheduled");

        self.debouncer.trigger(Request {
            username: username.to_string(),
            seq,
        });
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Wait until the state is no longer loading and return it.
    pub async fn settled(&self) -> FetchState {
        let mut updates = self.subscribe();
        let settled = match updates.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

impl<S> std::fmt::Debug for RepoFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoFetcher")
            .field("state", &*self.state.borrow())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

async fn run_fetch<S: RepoSource>(
    source: Arc<S>,
    state: Arc<watch::Sender<FetchState>>,
    request: Request,
) {
    let Request { username, seq } = request;
    tracing::debug!(%username, seq, "fetch started");

    let repositories = match source.list_repos(&username).await {
        Ok(repositories) => repositories,
        Err(err) => {
            tracing::warn!(%username, error = %err, hint = err.hint(), "repository lookup failed");
            Vec::new()
        }
    };

    let applied = state.send_if_modified(|current| {
        if current.seq != seq {
            return false;
        }
        current.repositories = repositories;
        current.phase = Phase::Settled;
        true
    });

    if !applied {
        tracing::debug!(%username, seq, "discarded response for a superseded request");
    }
}
