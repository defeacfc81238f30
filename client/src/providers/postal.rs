//! Postal-code lookup trait.

use crate::address::PostalAddress;
use crate::error::Result;
use std::future::Future;

/// The CEP lookup service.
pub trait PostalLookup: Send + Sync {
    /// Look up an 8-digit CEP.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::CepNotFound`] for an unknown code, or
    /// a network error.
    fn lookup(&self, cep: &str) -> impl Future<Output = Result<PostalAddress>> + Send;
}
