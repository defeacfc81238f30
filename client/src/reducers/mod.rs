//! Flow reducers.
//!
//! One reducer per screen flow. All three are pure over their state and
//! reach collaborators only through returned effects.

mod account;
mod search;
mod wizard;

pub use account::AccountReducer;
pub use search::SearchReducer;
pub use wizard::WizardReducer;
