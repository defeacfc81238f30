//! # Inkbook Client Core
//!
//! Composable, type-safe core flows for the Inkbook tattoo-artist booking
//! client: the multi-tab registration/profile wizard, the debounced
//! professional-directory search, and the account settings flows
//! (two-factor setup, recovery codes, appointment-history export).
//!
//! ## Architecture
//!
//! Every flow is a reducer over owned state:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! Screens render from state and dispatch actions; they never validate or
//! perform I/O themselves. Validation results and every user-facing message
//! are values on state (`Notice`), rendered by a single dispatcher
//! component.
//!
//! ## Example: advancing the wizard
//!
//! ```rust,ignore
//! use inkbook_client::*;
//!
//! // User taps "Next" on the personal tab
//! let effects = reducer.reduce(&mut state, WizardAction::NextPressed, &env);
//!
//! // Either the active tab advanced, or state.notice names the first
//! // failing field.
//! assert_eq!(state.active_tab, Tab::Address);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod address;
pub mod config;
pub mod environment;
pub mod error;
pub mod format;
pub mod providers;
pub mod reducers;
pub mod state;
pub mod tabs;
pub mod validate;
pub mod work_hours;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::{AccountAction, SearchAction, WizardAction};
pub use config::{BuildEnvironment, ClientConfig, Platform};
pub use error::{ClientError, Result};
pub use state::{
    AccountState, FormData, Notice, NoticeLevel, Page, Professional,
    ProfessionalFormData, Role, SearchState, WizardMode, WizardState,
};
pub use tabs::Tab;
