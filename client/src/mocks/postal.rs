//! Mock postal lookup for testing.

use crate::address::PostalAddress;
use crate::error::{ClientError, Result};
use crate::providers::PostalLookup;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock postal lookup.
///
/// Knows the addresses it was seeded with; any other CEP is not found.
#[derive(Debug, Clone, Default)]
pub struct MockPostalLookup {
    known: Arc<Mutex<BTreeMap<String, PostalAddress>>>,
    calls: Arc<AtomicUsize>,
}

impl MockPostalLookup {
    /// Create an empty mock (every lookup fails with not-found).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a CEP (digits only) with its address.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn with_address(self, cep: &str, address: PostalAddress) -> Self {
        #[allow(clippy::unwrap_used)]
        self.known.lock().unwrap().insert(cep.to_string(), address);
        self
    }

    /// Number of lookups performed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PostalLookup for MockPostalLookup {
    fn lookup(&self, cep: &str) -> impl Future<Output = Result<PostalAddress>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::unwrap_used)]
        let found = self.known.lock().unwrap().get(cep).cloned();

        async move { found.ok_or(ClientError::CepNotFound) }
    }
}
