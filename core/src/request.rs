//! Per-Concern Request State
//!
//! Every asynchronous concern a surface renders (the home feed, a category
//! listing, the generator, an explanation panel, a visual panel) owns one
//! [`RequestController`]. The controller tracks the single visible
//! [`RequestState`] for that concern and enforces the product's ordering
//! rule: the latest trigger wins, always.
//!
//! # Design Philosophy
//!
//! - One state per concern at any time. `Loading` does not keep a stale
//!   value around; surfaces render a loader instead.
//! - Work is spawned, never awaited inline, so a render loop stays
//!   responsive. Outcomes come back over a channel and are applied by
//!   [`RequestController::poll`], which render loops call every frame.
//! - Every trigger bumps a generation counter and outcomes carry the
//!   generation they belong to. `poll` drops anything from an older
//!   generation, so a slow response can never overwrite a newer one.
//! - Failures are humanized at this boundary. The raw error is logged;
//!   the state only ever carries the fallback notice handed to `trigger`.
//! - Nothing retries. A failed concern stays failed until the user
//!   triggers it again.

use std::fmt::Display;
use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// The visible state of one asynchronous concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestState<T> {
    /// Nothing requested yet, or the concern was reset.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request finished with a value.
    Success(T),
    /// The latest request failed. Carries a user-renderable notice,
    /// never a raw error.
    Failure(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestState<T> {
    /// Whether the concern is untriggered or was reset.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The failure notice, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Outcome of one spawned request: which generation it belongs to, and
/// either the value or the stringified raw error.
type Outcome<T> = (u64, Result<T, String>);

/// State controller for one asynchronous concern.
///
/// Created alongside the surface that renders the concern; discarded (or
/// [`reset`](Self::reset)) when that surface goes away.
#[derive(Debug)]
pub struct RequestController<T> {
    state: RequestState<T>,
    /// Bumped by every trigger, fail, and reset. Outcomes from older
    /// generations are dead on arrival.
    generation: u64,
    /// Notice rendered if the in-flight request fails.
    fallback: String,
    outcome_tx: mpsc::UnboundedSender<Outcome<T>>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome<T>>,
}

impl<T: Send + 'static> RequestController<T> {
    /// Create a controller in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: RequestState::Idle,
            generation: 0,
            fallback: String::new(),
            outcome_tx,
            outcome_rx,
        }
    }

    /// Current state of the concern.
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        self.state.value()
    }

    /// The failure notice, if any.
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Start a new request for this concern.
    ///
    /// Moves the state to `Loading`, remembers `fallback` as the notice to
    /// render on failure, and spawns `future` on the current tokio
    /// runtime. Any previously in-flight request is superseded: its
    /// outcome will be dropped by [`poll`](Self::poll) when it lands.
    ///
    /// Must be called within a tokio runtime.
    pub fn trigger<F, E>(&mut self, fallback: impl Into<String>, future: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        self.generation += 1;
        self.fallback = fallback.into();
        self.state = RequestState::Loading;

        let generation = self.generation;
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = future.await.map_err(|e| e.to_string());
            // The receiver only goes away with the whole controller.
            let _ = tx.send((generation, outcome));
        });
    }

    /// Fail the concern immediately, without spawning anything.
    ///
    /// Used for local precondition failures where the request must never
    /// leave the process. Supersedes any in-flight request.
    pub fn fail(&mut self, notice: impl Into<String>) {
        self.generation += 1;
        self.state = RequestState::Failure(notice.into());
    }

    /// Return the concern to `Idle`, superseding any in-flight request.
    ///
    /// Used when the concern's target disappears, like closing a panel.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
    }

    /// Apply any outcomes that have landed since the last call.
    ///
    /// Non-blocking; render loops call this every frame. Returns whether
    /// the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((generation, outcome)) = self.outcome_rx.try_recv() {
            if generation != self.generation {
                debug!(
                    stale = generation,
                    current = self.generation,
                    "Dropping superseded request outcome"
                );
                continue;
            }
            match outcome {
                Ok(value) => {
                    self.state = RequestState::Success(value);
                }
                Err(raw) => {
                    warn!(error = %raw, "Request failed; rendering fallback notice");
                    self.state = RequestState::Failure(self.fallback.clone());
                }
            }
            changed = true;
        }
        changed
    }
}

impl<T: Send + 'static> Default for RequestController<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::sleep;

    /// Long enough for every spawned test future to land.
    const SETTLE: Duration = Duration::from_millis(120);

    #[test]
    fn default_state_is_idle() {
        assert_eq!(RequestState::<u32>::default(), RequestState::Idle);
    }

    #[test]
    fn new_controller_is_idle() {
        let controller = RequestController::<u32>::new();
        assert!(controller.state().is_idle());
        assert!(controller.value().is_none());
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn trigger_moves_to_loading_before_any_poll() {
        let mut controller = RequestController::<u32>::new();
        controller.trigger("fallback", async {
            sleep(Duration::from_millis(40)).await;
            Ok::<_, String>(1)
        });
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn poll_applies_success() {
        let mut controller = RequestController::<u32>::new();
        controller.trigger("fallback", async { Ok::<_, String>(42) });

        sleep(SETTLE).await;
        assert!(controller.poll());
        assert_eq!(controller.value(), Some(&42));
    }

    #[tokio::test]
    async fn poll_substitutes_fallback_for_raw_error() {
        let mut controller = RequestController::<u32>::new();
        controller.trigger("The oracle is resting.", async {
            Err::<u32, _>("connection refused (os error 111)".to_string())
        });

        sleep(SETTLE).await;
        assert!(controller.poll());
        assert_eq!(controller.error(), Some("The oracle is resting."));
        // The raw error must not leak into the visible state.
        assert_eq!(
            controller.state(),
            &RequestState::Failure("The oracle is resting.".to_string())
        );
    }

    #[tokio::test]
    async fn latest_trigger_wins_even_when_it_finishes_first() {
        let mut controller = RequestController::<&'static str>::new();

        // A is slow and lands after B.
        controller.trigger("fallback", async {
            sleep(Duration::from_millis(60)).await;
            Ok::<_, String>("A")
        });
        controller.trigger("fallback", async {
            sleep(Duration::from_millis(5)).await;
            Ok::<_, String>("B")
        });

        sleep(SETTLE).await;
        assert!(controller.poll());
        assert_eq!(controller.value(), Some(&"B"));

        // A's late outcome is gone for good.
        assert!(!controller.poll());
        assert_eq!(controller.value(), Some(&"B"));
    }

    #[tokio::test]
    async fn stale_failure_cannot_overwrite_newer_success() {
        let mut controller = RequestController::<&'static str>::new();

        controller.trigger("old fallback", async {
            sleep(Duration::from_millis(60)).await;
            Err::<&'static str, _>("slow failure".to_string())
        });
        controller.trigger("new fallback", async { Ok::<_, String>("fresh") });

        sleep(SETTLE).await;
        controller.poll();
        assert_eq!(controller.value(), Some(&"fresh"));
    }

    #[tokio::test]
    async fn fail_is_immediate_and_supersedes_in_flight_work() {
        let mut controller = RequestController::<u32>::new();
        controller.trigger("fallback", async {
            sleep(Duration::from_millis(30)).await;
            Ok::<_, String>(7)
        });
        controller.fail("Please enter a topic.");

        assert_eq!(controller.error(), Some("Please enter a topic."));

        sleep(SETTLE).await;
        assert!(!controller.poll());
        assert_eq!(controller.error(), Some("Please enter a topic."));
    }

    #[tokio::test]
    async fn reset_returns_to_idle_and_supersedes_in_flight_work() {
        let mut controller = RequestController::<u32>::new();
        controller.trigger("fallback", async { Ok::<_, String>(7) });
        controller.reset();

        sleep(SETTLE).await;
        assert!(!controller.poll());
        assert!(controller.state().is_idle());
    }

    #[tokio::test]
    async fn loading_drops_the_previous_value() {
        let mut controller = RequestController::<u32>::new();
        controller.trigger("fallback", async { Ok::<_, String>(1) });
        sleep(SETTLE).await;
        controller.poll();
        assert_eq!(controller.value(), Some(&1));

        controller.trigger("fallback", async {
            sleep(Duration::from_millis(60)).await;
            Ok::<_, String>(2)
        });
        assert!(controller.is_loading());
        assert!(controller.value().is_none());
    }
}
