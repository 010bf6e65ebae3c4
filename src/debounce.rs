use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Which edges of a burst of triggers run the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceMode {
    /// Run once, after the quiet period, with the latest argument.
    #[default]
    Trailing,
    /// Also run right away when no timer is pending. The trailing run
    /// still happens once the burst goes quiet, so a one-call burst runs
    /// the action twice with the same argument.
    Immediate,
}

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Coalesces bursts of `trigger` calls into a single run of an async action.
///
/// Each debouncer owns its own pending timer, so independent instances never
/// cancel each other. Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    mode: DebounceMode,
    action: Action<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + 'static,
{
    pub fn new<F, Fut>(delay: Duration, mode: DebounceMode, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            mode,
            action: Arc::new(move |arg: T| action(arg).boxed()),
            pending: None,
        }
    }

    /// Whether a timer is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Restart the quiet period with `arg` as the argument for the next run.
    pub fn trigger(&mut self, arg: T) {
        let call_now = self.mode == DebounceMode::Immediate && !self.is_pending();
        self.cancel();

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let deferred = arg.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: aborting the timer must not abort a run in progress.
            tokio::spawn(action(deferred));
        }));

        if call_now {
            tokio::spawn((self.action)(arg));
        }
    }
}

impl<T> Debouncer<T> {
    /// Drop the pending timer, if any, without running the action.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("mode", &self.mode)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
