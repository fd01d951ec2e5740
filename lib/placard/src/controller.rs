//! Fetch lifecycle state and controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::{FetchError, Record, RecordFetcher};

/// Lifecycle of a fetch operation.
///
/// Exactly one variant holds at any time. Valid transitions: any non-Pending
/// state to `Pending` on start, and `Pending` to `Success` or `Failure` when
/// the in-flight fetch resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// No fetch has been started yet.
    Idle,
    /// A fetch is in flight.
    Pending,
    /// The last fetch decoded a record.
    Success(Record),
    /// The last fetch failed.
    Failure(FetchError),
}

impl FetchState {
    /// Returns `true` if no fetch has been started yet.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` if a fetch is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the record if the last fetch succeeded.
    #[must_use]
    pub const fn record(&self) -> Option<&Record> {
        match self {
            Self::Success(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the error if the last fetch failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Identifier of a registered observer, returned by
/// [`FetchController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&FetchState) + Send + Sync>;

/// Owns the fetch lifecycle for one fetcher.
///
/// The controller holds the latest [`FetchState`], runs at most one fetch at
/// a time, and notifies observers synchronously after every transition. A
/// renderer subscribes once and redraws on each notification; its retry
/// control calls [`retry`](Self::retry).
pub struct FetchController<F> {
    fetcher: F,
    state: Mutex<FetchState>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    // Serializes a state write with its observer notifications, so a
    // Pending notification is never observed after its terminal state.
    order: Mutex<()>,
    next_id: AtomicU64,
}

impl<F> std::fmt::Debug for FetchController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchController")
            .field("state", &self.current_state())
            .finish_non_exhaustive()
    }
}

impl<F> FetchController<F> {
    /// Create a controller in the `Idle` state.
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            state: Mutex::new(FetchState::Idle),
            observers: Mutex::new(Vec::new()),
            order: Mutex::new(()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Synchronous read of the latest known state.
    #[must_use]
    pub fn current_state(&self) -> FetchState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register an observer called synchronously after each state transition.
    ///
    /// Observers run on the task that drove the transition, in registration
    /// order, with no queueing or batching. An observer must not subscribe or
    /// unsubscribe from within its callback, and must return promptly: no
    /// further transition can begin while a callback runs, so a blocked
    /// observer stalls concurrent `start` calls. State reads via
    /// [`current_state`](Self::current_state) remain available throughout.
    pub fn subscribe(&self, observer: impl Fn(&FetchState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered observer.
    ///
    /// Returns `true` if the observer was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    fn notify(&self, state: &FetchState) {
        let observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, observer) in observers.iter() {
            observer(state);
        }
    }

    fn apply(&self, next: FetchState) {
        let _order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next.clone();
        self.notify(&next);
    }
}

impl<F: RecordFetcher> FetchController<F> {
    /// Start a fetch.
    ///
    /// Transitions to `Pending`, invokes the fetcher once, and transitions to
    /// `Success` or `Failure` exactly once when it resolves. Calling `start`
    /// while a fetch is already in flight is a no-op; the later call is
    /// suppressed, not queued. There is no cancellation affordance, but if
    /// the returned future is dropped before the fetch resolves (a caller
    /// wrapping it in a timeout or `select!`), the abandoned operation is
    /// recorded as a network-class `Failure`, so the controller never stays
    /// `Pending` and retry remains available.
    pub async fn start(&self) {
        {
            let _order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.is_pending() {
                debug!("fetch already in flight, start suppressed");
                return;
            }
            *state = FetchState::Pending;
            drop(state);
            self.notify(&FetchState::Pending);
        }
        debug!("fetch started");

        let mut guard = CancelGuard {
            controller: self,
            armed: true,
        };
        let next = match self.fetcher.fetch().await {
            Ok(record) => FetchState::Success(record),
            Err(error) => {
                warn!(%error, "fetch failed");
                FetchState::Failure(error)
            }
        };
        guard.armed = false;
        self.apply(next);
    }

    /// Retry the fetch.
    ///
    /// Semantically identical to [`start`](Self::start); named so a UI can
    /// bind a single action regardless of the current state.
    pub async fn retry(&self) {
        self.start().await;
    }
}

// Applies the Failure transition when a `start` future is dropped mid-fetch,
// so a cancelled caller cannot leave the controller Pending forever.
struct CancelGuard<'a, F> {
    controller: &'a FetchController<F>,
    armed: bool,
}

impl<F> Drop for CancelGuard<'_, F> {
    fn drop(&mut self) {
        if self.armed {
            warn!("fetch future dropped mid-flight");
            self.controller
                .apply(FetchState::Failure(FetchError::network("fetch cancelled")));
        }
    }
}
