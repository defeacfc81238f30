//! # Inkbook Runtime
//!
//! Store runtime for the Inkbook client architecture.
//!
//! The [`Store`] owns one screen flow's state, serializes reducer execution
//! behind a write lock, and executes the effects the reducer returns. Effects
//! run on spawned tasks; any action an effect produces is fed back into the
//! reducer (the unidirectional loop) and also broadcast to observers so
//! callers can await terminal outcomes.
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use inkbook_runtime::Store;
//!
//! let store = Store::new(SearchState::default(), SearchReducer, environment);
//!
//! store.send(SearchAction::TermChanged { term: "fineline".into() }).await?;
//! let results = store.state(|s| s.page.content.len()).await;
//! ```

use inkbook_core::{effect::Effect, reducer::Reducer};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Decrements the pending-effect counter when dropped.
///
/// Keeps the shutdown accounting correct even if an effect task panics.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The Store - owns flow state and drives the action/effect loop.
///
/// One store is created per screen flow (wizard, search, account) and
/// dropped with it; state never outlives the store.
///
/// # Concurrency
///
/// - The reducer executes synchronously while holding the state write lock,
///   so concurrent `send` calls serialize at the reducer.
/// - Effects execute on spawned tasks; `send` returns after starting them,
///   not after they complete.
/// - Actions produced by effects are fed back into the reducer and then
///   broadcast to observers, so an observer of a terminal action always
///   sees the post-transition state.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment.
    ///
    /// The action broadcast channel buffers 16 actions; raise it with
    /// [`Store::with_broadcast_capacity`] if observers lag.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
    }

    /// Create a new store with a custom action broadcast capacity.
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Send an action to the store.
    ///
    /// 1. Acquires the state write lock
    /// 2. Calls the reducer with `(state, action, environment)`
    /// 3. Starts execution of the returned effects
    ///
    /// Effects may still be running when this returns; use
    /// [`Store::send_and_wait_for`] to await a terminal action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        tracing::trace!(count = effects.len(), "executing effects");
        for effect in effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    /// Send an action and wait for a matching result action.
    ///
    /// Designed for request-response flows: subscribe to the action
    /// broadcast *before* sending (no race), send the action, then return
    /// the first effect-produced action matching the predicate.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: no matching action before the deadline
    /// - [`StoreError::ChannelClosed`]: broadcast channel closed
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Slow observer; if the terminal action was dropped
                        // the timeout catches it.
                        tracing::warn!(skipped, "action observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Subscribe to all actions produced by effects.
    ///
    /// Actions sent directly via [`Store::send`] are not broadcast, only
    /// those produced by effect execution.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Read current state via a closure.
    ///
    /// ```ignore
    /// let unlocked = store.state(|s| s.available_tabs()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Number of effect tasks currently running.
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::Acquire)
    }

    /// Initiate graceful shutdown.
    ///
    /// Sets the shutdown flag (rejecting new actions), then waits for
    /// pending effect tasks to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("initiating graceful shutdown");
        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(50);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("all effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending, "shutdown timed out");
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Execute a single effect, spawning tasks for the async variants.
    fn execute_effect(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {
                tracing::trace!("Effect::None (no-op)");
            },
            Effect::Future(fut) => {
                tracing::trace!("Effect::Future");
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let guard = PendingGuard(Arc::clone(&self.pending_effects));
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    if let Some(action) = fut.await {
                        store.feed_back(action).await;
                    }
                });
            },
            Effect::Delay { duration, action } => {
                tracing::trace!(?duration, "Effect::Delay");
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let guard = PendingGuard(Arc::clone(&self.pending_effects));
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                });
            },
            Effect::Parallel(effects) => {
                tracing::trace!(count = effects.len(), "Effect::Parallel");
                for effect in effects {
                    self.execute_effect(effect);
                }
            },
            Effect::Sequential(effects) => {
                tracing::trace!(count = effects.len(), "Effect::Sequential");
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let guard = PendingGuard(Arc::clone(&self.pending_effects));
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    for effect in effects {
                        store.run_effect_inline(effect).await;
                    }
                });
            },
        }
    }

    /// Run an effect to completion on the current task.
    ///
    /// Used inside `Sequential` so each step finishes before the next
    /// starts. Boxed for async recursion.
    fn run_effect_inline(
        &self,
        effect: Effect<A>,
    ) -> futures::future::BoxFuture<'_, ()> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        self.feed_back(action).await;
                    }
                },
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    self.feed_back(*action).await;
                },
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect_inline(effect).await;
                    }
                },
            }
        })
    }

    /// Feed an effect-produced action back to the reducer, then broadcast
    /// it.
    ///
    /// The reducer runs first so that an observer awaiting a terminal
    /// action always sees the post-transition state.
    async fn feed_back(&self, action: A) {
        if let Err(error) = self.send(action.clone()).await {
            tracing::debug!(%error, "feedback action dropped");
        }
        let _ = self.action_broadcast.send(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkbook_core::{smallvec, SmallVec};

    #[derive(Clone, Debug, Default)]
    struct PingState {
        pings: u32,
        pongs: u32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum PingAction {
        Ping,
        DelayedPing,
        Pong,
    }

    struct PingReducer;

    impl Reducer for PingReducer {
        type State = PingState;
        type Action = PingAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                PingAction::Ping => {
                    state.pings += 1;
                    smallvec![Effect::Future(Box::pin(async {
                        Some(PingAction::Pong)
                    }))]
                },
                PingAction::DelayedPing => {
                    state.pings += 1;
                    smallvec![Effect::Delay {
                        duration: Duration::from_millis(20),
                        action: Box::new(PingAction::Pong),
                    }]
                },
                PingAction::Pong => {
                    state.pongs += 1;
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[tokio::test]
    async fn future_effect_feeds_action_back() {
        let store = Store::new(PingState::default(), PingReducer, ());

        let result = store
            .send_and_wait_for(
                PingAction::Ping,
                |a| matches!(a, PingAction::Pong),
                Duration::from_secs(1),
            )
            .await;

        assert!(result.is_ok());
        let state = store.state(Clone::clone).await;
        assert_eq!(state.pings, 1);
        assert_eq!(state.pongs, 1);
    }

    #[tokio::test]
    async fn delay_effect_dispatches_after_sleep() {
        let store = Store::new(PingState::default(), PingReducer, ());

        store.send(PingAction::DelayedPing).await.unwrap();
        let pongs = store.state(|s| s.pongs).await;
        assert_eq!(pongs, 0, "delay has not elapsed yet");

        tokio::time::sleep(Duration::from_millis(80)).await;
        let pongs = store.state(|s| s.pongs).await;
        assert_eq!(pongs, 1);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = Store::new(PingState::default(), PingReducer, ());

        store.shutdown(Duration::from_secs(1)).await.unwrap();
        let result = store.send(PingAction::Ping).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
    }

    #[tokio::test]
    async fn shutdown_waits_for_pending_effects() {
        let store = Store::new(PingState::default(), PingReducer, ());

        store.send(PingAction::DelayedPing).await.unwrap();
        assert_eq!(store.pending_effects(), 1);

        store.shutdown(Duration::from_secs(1)).await.unwrap();
        assert_eq!(store.pending_effects(), 0);
    }
}
