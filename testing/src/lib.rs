//! # TechConf Testing
//!
//! Testing utilities and helpers for the TechConf registration architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use techconf_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(RegistrationReducer::new())
//!     .with_env(test_environment())
//!     .given_state(RegistrationState::default())
//!     .when_action(RegistrationAction::Advance)
//!     .then_state(|state| {
//!         assert_eq!(state.step, WizardStep::Information);
//!     })
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use techconf_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use techconf_testing::mocks::FixedClock;
    /// use techconf_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-06-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Fluent Given-When-Then harness for reducers
pub mod reducer_test {
    #![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

    use techconf_core::effect::Effect;
    use techconf_core::reducer::Reducer;

    /// Type alias for state assertion functions
    type StateAssertion<S> = Box<dyn FnOnce(&S)>;

    /// Type alias for effect assertion functions
    type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

    /// Fluent API for testing reducers with Given-When-Then syntax
    ///
    /// # Example
    ///
    /// ```ignore
    /// use techconf_testing::ReducerTest;
    ///
    /// ReducerTest::new(RegistrationReducer::new())
    ///     .with_env(test_environment())
    ///     .given_state(RegistrationState::default())
    ///     .when_action(RegistrationAction::SelectTicket(TicketTier::Premium))
    ///     .then_state(|state| {
    ///         assert_eq!(state.draft.ticket_type, TicketTier::Premium);
    ///     })
    ///     .then_effects(|effects| {
    ///         assert_eq!(effects.len(), 1);
    ///     })
    ///     .run();
    /// ```
    pub struct ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        reducer: R,
        environment: Option<E>,
        initial_state: Option<S>,
        actions: Vec<A>,
        state_assertions: Vec<StateAssertion<S>>,
        effect_assertions: Vec<EffectAssertion<A>>,
    }

    impl<R, S, A, E> ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new reducer test with the given reducer
        #[must_use]
        pub const fn new(reducer: R) -> Self {
            Self {
                reducer,
                environment: None,
                initial_state: None,
                actions: Vec::new(),
                state_assertions: Vec::new(),
                effect_assertions: Vec::new(),
            }
        }

        /// Set the environment for the test
        #[must_use]
        pub fn with_env(mut self, env: E) -> Self {
            self.environment = Some(env);
            self
        }

        /// Set the initial state (Given)
        #[must_use]
        pub fn given_state(mut self, state: S) -> Self {
            self.initial_state = Some(state);
            self
        }

        /// Set the action to test (When)
        ///
        /// May be called multiple times; actions are reduced in order and
        /// the assertions observe the final state and the effects of the
        /// last action.
        #[must_use]
        pub fn when_action(mut self, action: A) -> Self {
            self.actions.push(action);
            self
        }

        /// Add an assertion about the resulting state (Then)
        #[must_use]
        pub fn then_state<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&S) + 'static,
        {
            self.state_assertions.push(Box::new(assertion));
            self
        }

        /// Add an assertion about the effects of the last action (Then)
        #[must_use]
        pub fn then_effects<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&[Effect<A>]) + 'static,
        {
            self.effect_assertions.push(Box::new(assertion));
            self
        }

        /// Run the test and execute all assertions
        ///
        /// # Panics
        ///
        /// Panics if initial state, action, or environment is not set,
        /// or if any assertions fail.
        #[allow(clippy::expect_used)] // Test code can use expect
        pub fn run(self) {
            let mut state = self
                .initial_state
                .expect("Initial state must be set with given_state()");

            let env = self
                .environment
                .expect("Environment must be set with with_env()");

            assert!(
                !self.actions.is_empty(),
                "At least one action must be set with when_action()"
            );

            // Execute reducer for each action; keep the last effects
            let mut effects = smallvec::SmallVec::<[Effect<A>; 4]>::new();
            for action in self.actions {
                effects = self.reducer.reduce(&mut state, action, &env);
            }

            // Run state assertions
            for assertion in self.state_assertions {
                assertion(&state);
            }

            // Run effect assertions
            for assertion in self.effect_assertions {
                assertion(&effects);
            }
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use techconf_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Assert that effects contain at least one Delay effect
    ///
    /// # Panics
    ///
    /// Panics if no Delay effect is found.
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Delay { .. })),
            "Expected at least one Delay effect, but none found"
        );
    }

    /// Assert that effects contain a Cancellable effect registered under `id`
    ///
    /// # Panics
    ///
    /// Panics if no matching Cancellable effect is found.
    pub fn assert_has_cancellable_effect<A>(effects: &[Effect<A>], id: &str) {
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, Effect::Cancellable { id: eid, .. } if eid.as_str() == id)),
            "Expected a Cancellable effect with id {id:?}, but none found"
        );
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;
