//! Client environment.
//!
//! The environment carries every external collaborator the reducers need.
//! Production wires the HTTP providers; tests wire the mocks.

use crate::config::ClientConfig;
use crate::providers::{AccountsApi, FileShare, PostalLookup, ProfessionalDirectory};
use inkbook_core::environment::Clock;
use std::sync::Arc;

/// Client environment.
///
/// # Type Parameters
///
/// - `A`: accounts API (the REST backend)
/// - `D`: professional directory
/// - `P`: postal lookup
/// - `F`: file/share surface
#[derive(Clone)]
pub struct ClientEnvironment<A, D, P, F>
where
    A: AccountsApi + Clone,
    D: ProfessionalDirectory + Clone,
    P: PostalLookup + Clone,
    F: FileShare + Clone,
{
    /// Accounts API.
    pub api: A,

    /// Professional directory.
    pub directory: D,

    /// Postal lookup.
    pub postal: P,

    /// File/share surface.
    pub files: F,

    /// Clock (birth-date age checks).
    pub clock: Arc<dyn Clock>,

    /// Product configuration.
    pub config: ClientConfig,
}

impl<A, D, P, F> ClientEnvironment<A, D, P, F>
where
    A: AccountsApi + Clone,
    D: ProfessionalDirectory + Clone,
    P: PostalLookup + Clone,
    F: FileShare + Clone,
{
    /// Create a new client environment.
    #[must_use]
    pub fn new(
        api: A,
        directory: D,
        postal: P,
        files: F,
        clock: Arc<dyn Clock>,
        config: ClientConfig,
    ) -> Self {
        Self {
            api,
            directory,
            postal,
            files,
            clock,
            config,
        }
    }
}
