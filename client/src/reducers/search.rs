//! Professional-directory search reducer.
//!
//! An explicit state machine (`Idle → Debouncing → Fetching → Idle`)
//! replaces the usual mutable-ref debounce flags:
//!
//! - every filter change resets the page to 0, bumps the debounce
//!   generation, and arms a fresh `Delay`; a firing whose generation is
//!   stale is ignored, which makes the debounce trailing-edge without ever
//!   cancelling a timer
//! - a firing that lands while a fetch is in flight sets `refetch_pending`
//!   instead of dispatching: the in-flight call is deferred to, never
//!   cancelled, and the queued fetch is issued on completion with the
//!   latest filters
//! - explicit pagination skips the debounce entirely
//! - a failed fetch clears the displayed results; stale data is never kept

use crate::actions::SearchAction;
use crate::environment::ClientEnvironment;
use crate::providers::{
    AccountsApi, FileShare, PostalLookup, ProfessionalDirectory, SearchQuery,
};
use crate::state::{Notice, Page, SearchPhase, SearchState};
use inkbook_core::effect::Effect;
use inkbook_core::reducer::Reducer;
use inkbook_core::{smallvec, SmallVec};

/// Professional-directory search reducer.
#[derive(Debug, Clone)]
pub struct SearchReducer<A, D, P, F> {
    _phantom: std::marker::PhantomData<(A, D, P, F)>,
}

impl<A, D, P, F> SearchReducer<A, D, P, F> {
    /// Create a new search reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, D, P, F> Default for SearchReducer<A, D, P, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, D, P, F> SearchReducer<A, D, P, F>
where
    A: AccountsApi + Clone + 'static,
    D: ProfessionalDirectory + Clone + 'static,
    P: PostalLookup + Clone + 'static,
    F: FileShare + Clone + 'static,
{
    /// Arm a fresh debounce timer for the current filters.
    ///
    /// The page is already reset by the caller; the new generation
    /// invalidates every timer still in flight.
    fn arm_debounce(
        state: &mut SearchState,
        env: &ClientEnvironment<A, D, P, F>,
    ) -> SmallVec<[Effect<SearchAction>; 4]> {
        state.debounce_generation += 1;
        if state.phase != SearchPhase::Fetching {
            state.phase = SearchPhase::Debouncing;
        }

        smallvec![Effect::Delay {
            duration: env.config.search_debounce,
            action: Box::new(SearchAction::DebounceElapsed {
                generation: state.debounce_generation,
            }),
        }]
    }

    /// Issue a fetch with the filters as they are right now.
    fn start_fetch(
        state: &mut SearchState,
        env: &ClientEnvironment<A, D, P, F>,
    ) -> SmallVec<[Effect<SearchAction>; 4]> {
        state.phase = SearchPhase::Fetching;

        let query = SearchQuery::from_filters(
            &state.filters,
            state.page_index,
            env.config.search_page_size,
        );
        let directory = env.directory.clone();

        tracing::debug!(page = query.page, term = %query.term, "dispatching directory search");

        smallvec![Effect::Future(Box::pin(async move {
            match directory.search(&query).await {
                Ok(page) => Some(SearchAction::FetchSucceeded { page }),
                Err(error) => Some(SearchAction::FetchFailed { error }),
            }
        }))]
    }

    /// Dispatch now, or defer until the in-flight fetch completes.
    fn dispatch_or_defer(
        state: &mut SearchState,
        env: &ClientEnvironment<A, D, P, F>,
    ) -> SmallVec<[Effect<SearchAction>; 4]> {
        if state.phase == SearchPhase::Fetching {
            state.refetch_pending = true;
            SmallVec::new()
        } else {
            Self::start_fetch(state, env)
        }
    }
}

impl<A, D, P, F> Reducer for SearchReducer<A, D, P, F>
where
    A: AccountsApi + Clone + 'static,
    D: ProfessionalDirectory + Clone + 'static,
    P: PostalLookup + Clone + 'static,
    F: FileShare + Clone + 'static,
{
    type State = SearchState;
    type Action = SearchAction;
    type Environment = ClientEnvironment<A, D, P, F>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Filter changes: reset page, re-arm the debounce
            // ═══════════════════════════════════════════════════════════
            SearchAction::TermChanged { term } => {
                state.filters.term = term;
                state.page_index = 0;
                Self::arm_debounce(state, env)
            },

            SearchAction::LocationChanged { location } => {
                state.filters.location = location;
                state.page_index = 0;
                Self::arm_debounce(state, env)
            },

            SearchAction::MinRatingChanged { rating } => {
                state.filters.min_rating = rating;
                state.page_index = 0;
                Self::arm_debounce(state, env)
            },

            SearchAction::SpecialtyToggled { name, selected } => {
                if selected {
                    state.filters.specialties.insert(name);
                } else {
                    state.filters.specialties.remove(&name);
                }
                state.page_index = 0;
                Self::arm_debounce(state, env)
            },

            SearchAction::SortChanged { sort } => {
                // A refetch is forced even when the page is already 0.
                state.filters.sort = sort;
                state.page_index = 0;
                Self::arm_debounce(state, env)
            },

            // ═══════════════════════════════════════════════════════════
            // Explicit pagination: no debounce, no filter reset
            // ═══════════════════════════════════════════════════════════
            SearchAction::NextPage => {
                if !state.page.has_next {
                    return SmallVec::new();
                }
                state.page_index += 1;
                Self::dispatch_or_defer(state, env)
            },

            SearchAction::PrevPage => {
                if !state.page.has_previous || state.page_index == 0 {
                    return SmallVec::new();
                }
                state.page_index -= 1;
                Self::dispatch_or_defer(state, env)
            },

            // ═══════════════════════════════════════════════════════════
            // Timer and fetch events
            // ═══════════════════════════════════════════════════════════
            SearchAction::DebounceElapsed { generation } => {
                if generation != state.debounce_generation {
                    // A newer filter change re-armed the timer; this firing
                    // is the old edge.
                    tracing::trace!(generation, "stale debounce firing ignored");
                    return SmallVec::new();
                }
                Self::dispatch_or_defer(state, env)
            },

            SearchAction::FetchSucceeded { page } => {
                state.page = page;
                if state.refetch_pending {
                    state.refetch_pending = false;
                    Self::start_fetch(state, env)
                } else {
                    state.phase = SearchPhase::Idle;
                    SmallVec::new()
                }
            },

            SearchAction::FetchFailed { error } => {
                tracing::warn!(%error, "directory search failed");
                // Never retain stale results.
                state.page = Page::empty();
                state.notice = Some(Notice::error(
                    "Não foi possível carregar os profissionais. Tente novamente.",
                ));
                if state.refetch_pending {
                    state.refetch_pending = false;
                    Self::start_fetch(state, env)
                } else {
                    state.phase = SearchPhase::Idle;
                    SmallVec::new()
                }
            },

            SearchAction::NoticeDismissed => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::mocks::{MockAccountsApi, MockDirectory, MockFileShare, MockPostalLookup};
    use crate::state::SortKey;
    use inkbook_testing::{assertions, ReducerTest};
    use std::sync::Arc;

    type TestReducer =
        SearchReducer<MockAccountsApi, MockDirectory, MockPostalLookup, MockFileShare>;
    type TestEnv = ClientEnvironment<
        MockAccountsApi,
        MockDirectory,
        MockPostalLookup,
        MockFileShare,
    >;

    fn test_env() -> TestEnv {
        ClientEnvironment::new(
            MockAccountsApi::new(),
            MockDirectory::new(),
            MockPostalLookup::new(),
            MockFileShare::new(),
            Arc::new(inkbook_testing::test_clock()),
            ClientConfig::default(),
        )
    }

    fn one_result_page() -> Page<crate::state::Professional> {
        Page {
            content: vec![crate::state::Professional {
                id: crate::state::ProfessionalId::new(),
                name: "Bianca Rocha".into(),
                city: "São Paulo".into(),
                specialties: vec!["fineline".into()],
                rating: 4.8,
                rating_count: 37,
            }],
            total_pages: 3,
            total_elements: 25,
            has_next: true,
            has_previous: false,
        }
    }

    #[test]
    fn test_filter_change_resets_page_and_arms_delay() {
        let mut state = SearchState::default();
        state.page_index = 2;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::TermChanged {
                term: "old school".into(),
            })
            .then_state(|state| {
                assert_eq!(state.page_index, 0);
                assert_eq!(state.phase, SearchPhase::Debouncing);
                assert_eq!(state.debounce_generation, 1);
            })
            .then_effects(assertions::assert_has_delay_effect)
            .run();
    }

    #[test]
    fn test_stale_debounce_firing_is_ignored() {
        let mut state = SearchState::default();
        state.debounce_generation = 5;
        state.phase = SearchPhase::Debouncing;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::DebounceElapsed { generation: 4 })
            .then_state(|state| {
                assert_eq!(state.phase, SearchPhase::Debouncing);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_current_debounce_firing_dispatches_fetch() {
        let mut state = SearchState::default();
        state.debounce_generation = 5;
        state.phase = SearchPhase::Debouncing;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::DebounceElapsed { generation: 5 })
            .then_state(|state| {
                assert_eq!(state.phase, SearchPhase::Fetching);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_firing_during_fetch_defers_instead_of_cancelling() {
        let mut state = SearchState::default();
        state.debounce_generation = 2;
        state.phase = SearchPhase::Fetching;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::DebounceElapsed { generation: 2 })
            .then_state(|state| {
                assert_eq!(state.phase, SearchPhase::Fetching);
                assert!(state.refetch_pending);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_completion_with_pending_refetch_dispatches_again() {
        let mut state = SearchState::default();
        state.phase = SearchPhase::Fetching;
        state.refetch_pending = true;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::FetchSucceeded {
                page: one_result_page(),
            })
            .then_state(|state| {
                assert_eq!(state.phase, SearchPhase::Fetching);
                assert!(!state.refetch_pending);
                assert_eq!(state.page.content.len(), 1);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_failure_clears_results_and_raises_generic_notice() {
        let mut state = SearchState::default();
        state.phase = SearchPhase::Fetching;
        state.page = one_result_page();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::FetchFailed {
                error: crate::error::ClientError::Network {
                    status: Some(500),
                    message: "boom".into(),
                },
            })
            .then_state(|state| {
                assert!(state.page.content.is_empty());
                assert_eq!(state.phase, SearchPhase::Idle);
                assert!(state
                    .notice
                    .as_ref()
                    .unwrap()
                    .text
                    .contains("Não foi possível carregar"));
            })
            .run();
    }

    #[test]
    fn test_sort_change_forces_page_zero_refetch() {
        let mut state = SearchState::default();
        state.page_index = 0;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::SortChanged { sort: SortKey::Rating })
            .then_state(|state| {
                assert_eq!(state.page_index, 0);
                assert_eq!(state.filters.sort, SortKey::Rating);
                assert_eq!(state.debounce_generation, 1);
            })
            .then_effects(assertions::assert_has_delay_effect)
            .run();
    }

    #[test]
    fn test_pagination_skips_debounce() {
        let mut state = SearchState::default();
        state.page = one_result_page();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(SearchAction::NextPage)
            .then_state(|state| {
                assert_eq!(state.page_index, 1);
                assert_eq!(state.phase, SearchPhase::Fetching);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_pagination_without_next_page_is_noop() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(SearchState::default())
            .when_action(SearchAction::NextPage)
            .then_state(|state| {
                assert_eq!(state.page_index, 0);
                assert_eq!(state.phase, SearchPhase::Idle);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
