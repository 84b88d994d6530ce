//! # TechConf Runtime
//!
//! Runtime implementation for the TechConf registration architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Cancellation Registry**: Tracks cancellable effects so disposal can discard them
//!
//! ## Example
//!
//! ```ignore
//! use techconf_runtime::Store;
//! use techconf_core::reducer::Reducer;
//!
//! let store = Store::new(
//!     initial_state,
//!     my_reducer,
//!     environment,
//! );
//!
//! // Send an action
//! store.send(Action::Advance).await?;
//!
//! // Read state
//! let step = store.state(|s| s.step).await;
//! ```

use techconf_core::effect::{Effect, EffectId};
use techconf_core::reducer::Reducer;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{RwLock, broadcast, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated. A delayed effect that fires after shutdown receives
        /// this error and its action is discarded rather than applied to
        /// disposed state.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`store::Store::send`] to allow waiting for effects to
/// complete. Each action gets a handle that can be awaited to know when the
/// effects it spawned are done.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Submit).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // All effects from Action::Submit are now complete
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle
    ///
    /// Returns a tuple of `(EffectHandle, EffectTracking)` where the handle
    /// is returned to the caller for waiting and the tracking half is used
    /// internally during effect execution.
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete
    ///
    /// Blocks until the effect counter reaches zero.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: Effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements effect counter on drop
///
/// Ensures the effect counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Internal: registry of in-flight cancellable effects
///
/// Maps an [`EffectId`] to the cancellation flag of its running task.
/// Registering a new effect under an occupied id cancels the previous one.
struct CancellationRegistry {
    entries: Mutex<HashMap<EffectId, watch::Sender<bool>>>,
}

impl CancellationRegistry {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register a cancellable effect, returning the receiver its task
    /// should race against. A previous registration under the same id is
    /// cancelled.
    fn register(&self, id: EffectId) -> watch::Receiver<bool> {
        let (tx, rx) = watch::channel(false);
        let previous = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);
        if let Some(previous) = previous {
            let _ = previous.send(true);
        }
        rx
    }

    /// Cancel the effect registered under `id`, if any
    fn cancel(&self, id: &EffectId) -> bool {
        let entry = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        match entry {
            Some(tx) => {
                let _ = tx.send(true);
                true
            },
            None => false,
        }
    }

    /// Remove a finished effect without cancelling it
    fn deregister(&self, id: &EffectId) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    /// Cancel every registered effect (store disposal)
    fn cancel_all(&self) -> usize {
        let entries: Vec<_> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        let count = entries.len();
        for (_, tx) in entries {
            let _ = tx.send(true);
        }
        count
    }
}

/// Store module - The runtime for reducers
///
/// Coordinates reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, CancellationRegistry, DecrementGuard,
        Duration, Effect, EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreError,
        broadcast,
    };
    use futures::FutureExt;
    use futures::future::BoxFuture;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(
    ///     RegistrationState::default(),
    ///     RegistrationReducer::new(),
    ///     production_environment(),
    /// );
    ///
    /// store.send(RegistrationAction::Advance).await?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        cancellations: Arc<CancellationRegistry>,
        /// Action broadcast channel for observing actions produced by effects.
        ///
        /// All actions produced by effects (delays, futures) are broadcast to
        /// observers. This enables request-response waiting via
        /// [`Store::send_and_wait_for`].
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                cancellations: Arc::clone(&self.cancellations),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(16);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                cancellations: Arc::new(super::CancellationRegistry::new()),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Executes returned effects asynchronously
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// # Concurrency and Effect Execution
        ///
        /// - The reducer executes synchronously while holding a write lock
        /// - Effects execute asynchronously in spawned tasks
        /// - `send()` returns after starting effect execution, not completion
        /// - Multiple concurrent `send()` calls serialize at the reducer level
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            // Check if store is shutting down
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total").increment(1);

            // Create tracking for this action
            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                let duration = start.elapsed();
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(duration.as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            // Execute effects with tracking
            for effect in effects {
                self.execute_effect_internal(effect, tracking.clone());
            }
            tracing::debug!("Action processing completed, returning handle");

            Ok(handle)
        }

        /// Send an action and wait for a matching result action
        ///
        /// Designed for request-response patterns: subscribes to the action
        /// broadcast, sends the initial action, then waits for an action
        /// matching the predicate.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before matching action received
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        ///
        /// # Example
        ///
        /// ```ignore
        /// let result = store.send_and_wait_for(
        ///     RegistrationAction::Submit,
        ///     |a| matches!(a, RegistrationAction::SubmissionCompleted),
        ///     Duration::from_secs(10),
        /// ).await?;
        /// ```
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            // Subscribe BEFORE sending to avoid race condition
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {}, // Not the action we want, keep waiting
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Slow consumer, some actions were dropped. Keep
                            // waiting - the timeout catches a dropped terminal.
                            tracing::warn!(skipped, "Action observer lagged");
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

        /// Subscribe to all actions produced by effects
        ///
        /// Only actions produced by effects are broadcast, not the initial
        /// actions passed to [`Store::send`].
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let step = store.state(|s| s.step).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Cancels every registered cancellable effect, so pending delayed
        ///    transitions are discarded instead of applied to disposed state
        /// 3. Waits for remaining effects to finish (with timeout)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// before all pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            // Set shutdown flag to reject new actions
            self.shutdown.store(true, Ordering::Release);

            // Discard in-flight cancellable effects
            let cancelled = self.cancellations.cancel_all();
            if cancelled > 0 {
                tracing::debug!(cancelled, "Cancelled in-flight effects");
                metrics::counter!("store.shutdown.cancelled_effects").increment(cancelled as u64);
            }

            // Wait for pending effects with timeout
            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timeout");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect with tracking
        ///
        /// Internal method that executes effects with completion tracking.
        /// Uses [`DecrementGuard`] to ensure the effect counter is always
        /// decremented, even if the effect panics.
        ///
        /// # Effect Types
        ///
        /// - `None`: No-op
        /// - `Future`: Executes async computation, sends resulting action if `Some`
        /// - `Delay`: Waits for duration, then sends action
        /// - `Parallel`: Executes effects concurrently
        /// - `Sequential`: Executes effects in order, waiting for each to complete
        /// - `Cancellable`: Registers the inner effect and races it against cancellation
        /// - `Cancel`: Cancels a registered effect
        #[tracing::instrument(skip(self, effect, tracking), name = "execute_effect")]
        fn execute_effect_internal(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Cancel(id) => {
                    tracing::trace!(effect_id = %id, "Executing Effect::Cancel");
                    metrics::counter!("store.effects.executed", "type" => "cancel").increment(1);
                    if !self.cancellations.cancel(&id) {
                        tracing::debug!(effect_id = %id, "No registered effect to cancel");
                    }
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                    // Each branch carries the same tracking context
                    for effect in effects {
                        self.execute_effect_internal(effect, tracking.clone());
                    }
                },
                Effect::Cancellable { id, effect } => {
                    tracing::trace!(effect_id = %id, "Executing Effect::Cancellable");
                    metrics::counter!("store.effects.executed", "type" => "cancellable")
                        .increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let mut cancelled = self.cancellations.register(id.clone());
                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone);
                        let _pending_guard = pending_guard; // Decrement on drop

                        tokio::select! {
                            _ = cancelled.changed() => {
                                tracing::debug!(effect_id = %id, "Effect cancelled");
                                metrics::counter!("store.effects.cancelled").increment(1);
                            },
                            () = Self::run_inline(store.clone(), *effect) => {
                                store.cancellations.deregister(&id);
                            },
                        }
                    });
                },
                // Delay, Future and Sequential all run on a spawned task
                effect => {
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let tracking_clone = tracking.clone();
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking_clone);
                        let _pending_guard = pending_guard; // Decrement on drop

                        Self::run_inline(store, effect).await;
                    });
                },
            }
        }

        /// Run an effect to completion on the current task
        ///
        /// Used inside spawned tasks and cancellation scopes. Actions
        /// produced here are broadcast to observers and fed back to the
        /// store; feedback to a shut-down store is silently discarded.
        fn run_inline(store: Self, effect: Effect<A>) -> BoxFuture<'static, ()> {
            async move {
                match effect {
                    Effect::None => {},
                    Effect::Delay { duration, action } => {
                        tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);
                        metrics::counter!("store.effects.executed", "type" => "delay")
                            .increment(1);

                        tokio::time::sleep(duration).await;
                        tracing::trace!("Effect::Delay completed, sending action");

                        // Broadcast to observers
                        let _ = store.action_broadcast.send((*action).clone());

                        let _ = store.send(*action).await;
                    },
                    Effect::Future(fut) => {
                        tracing::trace!("Executing Effect::Future");
                        metrics::counter!("store.effects.executed", "type" => "future")
                            .increment(1);

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action");

                            let _ = store.action_broadcast.send(action.clone());
                            let _ = store.send(action).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    },
                    Effect::Sequential(effects) => {
                        metrics::counter!("store.effects.executed", "type" => "sequential")
                            .increment(1);

                        for effect in effects {
                            Self::run_inline(store.clone(), effect).await;
                        }
                    },
                    Effect::Parallel(effects) => {
                        let branches = effects
                            .into_iter()
                            .map(|effect| Self::run_inline(store.clone(), effect));
                        futures::future::join_all(branches).await;
                    },
                    Effect::Cancellable { id, effect } => {
                        // Nested cancellation scopes register like top-level ones
                        let mut cancelled = store.cancellations.register(id.clone());
                        tokio::select! {
                            _ = cancelled.changed() => {
                                tracing::debug!(effect_id = %id, "Effect cancelled");
                            },
                            () = Self::run_inline(store.clone(), *effect) => {
                                store.cancellations.deregister(&id);
                            },
                        }
                    },
                    Effect::Cancel(id) => {
                        store.cancellations.cancel(&id);
                    },
                }
            }
            .boxed()
        }
    }
}

pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use std::time::Duration;
    use techconf_core::effect::Effect;
    use techconf_core::reducer::Reducer;
    use techconf_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct PingState {
        pings: u32,
        pongs: u32,
    }

    #[derive(Clone, Debug)]
    enum PingAction {
        Ping,
        DelayedPong(Duration),
        CancellablePong { delay: Duration },
        CancelPong,
        Pong,
    }

    #[derive(Clone)]
    struct PingEnv;

    #[derive(Clone)]
    struct PingReducer;

    const PONG_EFFECT: &str = "ping/pong";

    impl Reducer for PingReducer {
        type State = PingState;
        type Action = PingAction;
        type Environment = PingEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                PingAction::Ping => {
                    state.pings += 1;
                    smallvec![Effect::None]
                },
                PingAction::DelayedPong(delay) => {
                    state.pings += 1;
                    smallvec![Effect::Delay {
                        duration: delay,
                        action: Box::new(PingAction::Pong),
                    }]
                },
                PingAction::CancellablePong { delay } => {
                    state.pings += 1;
                    smallvec![
                        Effect::Delay {
                            duration: delay,
                            action: Box::new(PingAction::Pong),
                        }
                        .cancellable(PONG_EFFECT)
                    ]
                },
                PingAction::CancelPong => {
                    smallvec![Effect::Cancel(PONG_EFFECT.into())]
                },
                PingAction::Pong => {
                    state.pongs += 1;
                    smallvec![Effect::None]
                },
            }
        }
    }

    fn ping_store() -> Store<PingState, PingAction, PingEnv, PingReducer> {
        Store::new(PingState::default(), PingReducer, PingEnv)
    }

    #[tokio::test]
    async fn send_applies_reducer_synchronously() {
        let store = ping_store();

        let mut handle = store.send(PingAction::Ping).await.unwrap();
        handle.wait().await;

        assert_eq!(store.state(|s| s.pings).await, 1);
        assert_eq!(store.state(|s| s.pongs).await, 0);
    }

    #[tokio::test]
    async fn delay_effect_feeds_action_back() {
        let store = ping_store();

        let mut handle = store
            .send(PingAction::DelayedPong(Duration::from_millis(10)))
            .await
            .unwrap();
        handle.wait().await;

        assert_eq!(store.state(|s| s.pongs).await, 1);
    }

    #[tokio::test]
    async fn cancel_discards_pending_delay() {
        let store = ping_store();

        store
            .send(PingAction::CancellablePong {
                delay: Duration::from_secs(30),
            })
            .await
            .unwrap();
        let mut handle = store.send(PingAction::CancelPong).await.unwrap();
        handle.wait().await;

        // Give the cancelled task a moment to unwind
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.state(|s| s.pongs).await, 0);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions_and_cancels_effects() {
        let store = ping_store();

        store
            .send(PingAction::CancellablePong {
                delay: Duration::from_secs(30),
            })
            .await
            .unwrap();

        store.shutdown(Duration::from_secs(1)).await.unwrap();

        let result = store.send(PingAction::Ping).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
        assert_eq!(store.state(|s| s.pongs).await, 0);
    }

    #[tokio::test]
    async fn send_and_wait_for_observes_feedback_action() {
        let store = ping_store();

        let result = store
            .send_and_wait_for(
                PingAction::DelayedPong(Duration::from_millis(10)),
                |a| matches!(a, PingAction::Pong),
                Duration::from_secs(1),
            )
            .await
            .unwrap();

        assert!(matches!(result, PingAction::Pong));
    }

    #[tokio::test]
    async fn reregistering_effect_id_cancels_previous() {
        let store = ping_store();

        store
            .send(PingAction::CancellablePong {
                delay: Duration::from_secs(30),
            })
            .await
            .unwrap();
        let mut handle = store
            .send(PingAction::CancellablePong {
                delay: Duration::from_millis(10),
            })
            .await
            .unwrap();
        handle.wait().await;

        // Only the second registration fires
        assert_eq!(store.state(|s| s.pongs).await, 1);
    }
}
