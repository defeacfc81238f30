//! # Inkbook Testing
//!
//! Testing utilities and helpers for the Inkbook client architecture.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given/When/Then harness for reducer unit tests
//! - Assertion helpers for effect vectors
//! - [`FixedClock`] for deterministic age/date checks
//!
//! ## Example
//!
//! ```ignore
//! use inkbook_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(SearchReducer::new(config))
//!     .with_env(test_environment())
//!     .given_state(SearchState::default())
//!     .when_action(SearchAction::TermChanged { term: "old school".into() })
//!     .then_state(|state| assert_eq!(state.page_index, 0))
//!     .then_effects(assertions::assert_has_delay_effect)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use inkbook_core::environment::Clock;


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests.
    ///
    /// Always returns the same time, so birth-date/age validations are
    /// reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use inkbook_testing::mocks::FixedClock;
    /// use inkbook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
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

    /// Create a default fixed clock for tests (2025-06-15 12:00:00 UTC).
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which should never
    /// happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock};
