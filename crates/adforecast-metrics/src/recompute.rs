//! Debounced, single-flight forecast recomputation.
//!
//! Every input change calls [`RecomputeController::schedule`]. Only the last
//! change in a burst survives the debounce delay. A resolution whose key is
//! already in flight is dropped rather than queued. Finished resolutions
//! publish into a `watch` channel; the latest write wins.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt as _;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::forecast::{ForecastOutcome, ForecastRequest, RecomputeKey};
use crate::resolver::HistoricalMetricsResolver;
use crate::session::ForecastSession;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Async resolution callback driven by the controller.
pub type ResolveFn =
    Arc<dyn Fn(ForecastRequest) -> BoxFuture<'static, ForecastOutcome> + Send + Sync>;

type InFlight = Arc<Mutex<HashSet<RecomputeKey>>>;

/// Holds a key in the in-flight set until dropped.
struct InFlightGuard {
    set: InFlight,
    key: RecomputeKey,
}

impl InFlightGuard {
    /// `None` if `key` is already in flight.
    fn acquire(set: &InFlight, key: RecomputeKey) -> Option<Self> {
        let mut keys = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(Self {
            set: Arc::clone(set),
            key,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut keys = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        keys.remove(&self.key);
    }
}

pub struct RecomputeController {
    delay: Duration,
    resolve: ResolveFn,
    pending: Mutex<Option<JoinHandle<()>>>,
    in_flight: InFlight,
    display: Arc<watch::Sender<Option<ForecastOutcome>>>,
}

impl RecomputeController {
    #[must_use]
    pub fn new(delay: Duration, resolve: ResolveFn) -> Self {
        let (display, _) = watch::channel(None);
        Self {
            delay,
            resolve,
            pending: Mutex::new(None),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            display: Arc::new(display),
        }
    }

    /// Controller that resolves through `resolver` within `session`.
    #[must_use]
    pub fn for_resolver(
        resolver: Arc<HistoricalMetricsResolver>,
        session: Arc<ForecastSession>,
        delay: Duration,
    ) -> Self {
        let resolve: ResolveFn = Arc::new(move |request: ForecastRequest| {
            let resolver = Arc::clone(&resolver);
            let session = Arc::clone(&session);
            async move { resolver.resolve(&session, &request).await }.boxed()
        });
        Self::new(delay, resolve)
    }

    /// Receiver for the displayed forecast. `None` until the first
    /// resolution completes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<ForecastOutcome>> {
        self.display.subscribe()
    }

    #[must_use]
    pub fn latest(&self) -> Option<ForecastOutcome> {
        self.display.borrow().clone()
    }

    /// Schedule a resolution of `request` after the debounce delay,
    /// replacing any timer that has not fired yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, request: ForecastRequest) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }

        let delay = self.delay;
        let resolve = Arc::clone(&self.resolve);
        let in_flight = Arc::clone(&self.in_flight);
        let display = Arc::clone(&self.display);

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(guard) = InFlightGuard::acquire(&in_flight, request.recompute_key()) else {
                tracing::debug!("identical forecast already in flight; dropping trigger");
                return;
            };

            // The resolution runs in its own task: aborting this timer from a
            // later `schedule` must not cancel it.
            tokio::spawn(async move {
                let _guard = guard;
                let outcome = resolve(request).await;
                tracing::debug!(
                    tier = %outcome.estimate.source_tier,
                    clicks = outcome.estimate.monthly_clicks,
                    "forecast recomputed"
                );
                display.send_replace(Some(outcome));
            });
        }));
    }

    /// Cancel the pending timer, if any. In-flight resolutions continue.
    pub fn cancel_pending(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }

    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for RecomputeController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "recompute_test.rs"]
mod tests;
