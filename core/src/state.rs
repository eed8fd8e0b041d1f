//! Resource state container: the Loading / Ready / Error projection of one
//! fetch lifecycle.
//!
//! # Design
//! Every `start` takes the next sequence number and publishes `Loading`
//! while holding the state lock; the spawned fetch publishes its terminal
//! state only if its sequence number is still the latest, checked under the
//! same lock. A superseded fetch can therefore never overwrite the state of
//! a newer one, whatever order the two resolve in (last-request-wins).
//!
//! State changes are fanned out on a `broadcast` channel in publish order,
//! so a subscriber sees `Loading` before the matching terminal state.
//! Dropping a `Subscription` revokes it.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info_span, warn, Instrument};

use crate::error::ApiError;

/// Buffered state changes per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 16;

/// Projection of one fetch lifecycle.
#[derive(Debug, Clone)]
pub enum UiState<T> {
    Loading,
    Ready(T),
    Error(ErrorInfo),
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            UiState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            UiState::Error(info) => Some(info),
            _ => None,
        }
    }
}

/// Cloneable handle to the error a fetch failed with.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    cause: Arc<ApiError>,
}

impl ErrorInfo {
    pub fn cause(&self) -> &ApiError {
        &self.cause
    }
}

impl From<ApiError> for ErrorInfo {
    fn from(cause: ApiError) -> Self {
        Self {
            cause: Arc::new(cause),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cause.fmt(f)
    }
}

struct Published<T> {
    seq: u64,
    key: Option<String>,
    in_flight: Option<AbortHandle>,
    state: Option<UiState<T>>,
}

struct Shared<T> {
    published: Mutex<Published<T>>,
    events: broadcast::Sender<UiState<T>>,
}

impl<T: Clone> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Published<T>> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, published: &mut Published<T>, state: UiState<T>) {
        published.state = Some(state.clone());
        // No subscribers is fine; current_state still sees the value.
        let _ = self.events.send(state);
    }

    /// Publish the terminal state of fetch `seq` unless a newer `start`
    /// has superseded it. Returns whether the state was published.
    fn finish(&self, seq: u64, state: UiState<T>) -> bool {
        let mut published = self.lock();
        if published.seq != seq {
            debug!(seq, latest = published.seq, "discarding superseded result");
            return false;
        }
        published.in_flight = None;
        self.publish(&mut published, state);
        true
    }
}

/// Owns the published state of one remote resource.
pub struct ResourceState<T> {
    shared: Arc<Shared<T>>,
    runtime: Handle,
}

impl<T> ResourceState<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Fetches run on `runtime`; `start` itself never blocks on them.
    pub fn new(runtime: Handle) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                published: Mutex::new(Published {
                    seq: 0,
                    key: None,
                    in_flight: None,
                    state: None,
                }),
                events,
            }),
            runtime,
        }
    }

    /// Publish `Loading` and spawn `fetch`, superseding any fetch still in
    /// flight. `key` names the requested resource for logging and for
    /// `in_flight_key`.
    ///
    /// The returned handle completes once the fetch has resolved and its
    /// result has been published or discarded.
    pub fn start<F, Fut>(&self, key: Option<String>, fetch: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let span = info_span!("fetch", key = key.as_deref().unwrap_or("-"));
        // Build the future before locking; `fetch` may read this container.
        let fetch = fetch().instrument(span.clone());
        let mut published = self.shared.lock();
        published.seq += 1;
        let seq = published.seq;
        if let Some(previous) = published.in_flight.take() {
            previous.abort();
        }

        let fetch_task = self.runtime.spawn(fetch);
        published.in_flight = Some(fetch_task.abort_handle());
        published.key = key;
        self.shared.publish(&mut published, UiState::Loading);
        drop(published);

        let shared = Arc::clone(&self.shared);
        self.runtime.spawn(
            async move {
                let state = match fetch_task.await {
                    Ok(Ok(data)) => UiState::Ready(data),
                    Ok(Err(cause)) => {
                        error!(seq, error = %cause, "fetch failed");
                        UiState::Error(cause.into())
                    }
                    Err(join) if join.is_cancelled() => {
                        debug!(seq, "fetch cancelled");
                        UiState::Error(ApiError::Aborted("superseded".to_string()).into())
                    }
                    Err(join) => {
                        error!(seq, "fetch panicked");
                        UiState::Error(ApiError::Aborted(join.to_string()).into())
                    }
                };
                shared.finish(seq, state);
            }
            .instrument(span),
        )
    }

    /// Drop the published state and abandon any fetch in flight, as when the
    /// screen showing this resource goes away. A pending result is
    /// discarded. Subscribers receive no event; `current_state` reads
    /// `None` until the next `start`.
    pub fn clear(&self) {
        let mut published = self.shared.lock();
        published.seq += 1;
        if let Some(previous) = published.in_flight.take() {
            previous.abort();
        }
        published.key = None;
        published.state = None;
        debug!(seq = published.seq, "state cleared");
    }

    /// Latest published state; `None` until the first `start`.
    pub fn current_state(&self) -> Option<UiState<T>> {
        self.shared.lock().state.clone()
    }

    /// Key of the fetch currently in flight, if any.
    pub fn in_flight_key(&self) -> Option<String> {
        let published = self.shared.lock();
        published.in_flight.as_ref().and(published.key.clone())
    }

    /// Subscribe to state changes published from now on. The state current
    /// at subscription time is available through `Subscription::initial`.
    pub fn subscribe(&self) -> Subscription<T> {
        let published = self.shared.lock();
        Subscription {
            initial: published.state.clone(),
            events: self.shared.events.subscribe(),
        }
    }
}

/// A revocable stream of state changes. Drop it to unsubscribe.
pub struct Subscription<T> {
    initial: Option<UiState<T>>,
    events: broadcast::Receiver<UiState<T>>,
}

impl<T: Clone> Subscription<T> {
    pub fn initial(&self) -> Option<&UiState<T>> {
        self.initial.as_ref()
    }

    /// Wait for the next state change. `None` once the container is gone.
    pub async fn next(&mut self) -> Option<UiState<T>> {
        loop {
            match self.events.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber lagged; skipping to newer states");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published change, without waiting.
    pub fn try_next(&mut self) -> Option<UiState<T>> {
        loop {
            match self.events.try_recv() {
                Ok(state) => return Some(state),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber lagged; skipping to newer states");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
