//! Professional-directory search trait.

use crate::error::Result;
use crate::state::{Page, Professional, SearchFilters, SortKey};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One directory query, built from the current filters at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text term.
    pub term: String,
    /// Location term.
    pub location: String,
    /// Minimum rating filter.
    pub min_rating: Option<f32>,
    /// Selected specialty names.
    pub specialties: Vec<String>,
    /// Sort key.
    pub sort: SortKey,
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
}

impl SearchQuery {
    /// Build a query from filters and pagination.
    #[must_use]
    pub fn from_filters(filters: &SearchFilters, page: u32, page_size: u32) -> Self {
        Self {
            term: filters.term.clone(),
            location: filters.location.clone(),
            min_rating: filters.min_rating,
            specialties: filters.specialties.iter().cloned().collect(),
            sort: filters.sort,
            page,
            page_size,
        }
    }
}

/// The directory search endpoint.
pub trait ProfessionalDirectory: Send + Sync {
    /// Run one paged search.
    ///
    /// # Errors
    ///
    /// Returns a network error; the search reducer clears displayed
    /// results on any failure.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Page<Professional>>> + Send;
}
