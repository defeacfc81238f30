//! Mock professional directory for testing.

use crate::error::{ClientError, Result};
use crate::providers::{ProfessionalDirectory, SearchQuery};
use crate::state::{Page, Professional};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock directory.
///
/// Records every query it receives and answers with a scripted page. An
/// optional artificial latency lets tests hold a fetch in flight.
#[derive(Debug, Clone)]
pub struct MockDirectory {
    queries: Arc<Mutex<Vec<SearchQuery>>>,
    page: Arc<Mutex<Page<Professional>>>,
    latency: Arc<Mutex<Option<Duration>>>,
    should_succeed: Arc<Mutex<bool>>,
}

impl MockDirectory {
    /// Create a mock answering an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queries: Arc::default(),
            page: Arc::default(),
            latency: Arc::default(),
            should_succeed: Arc::new(Mutex::new(true)),
        }
    }

    /// Script the page every search answers with.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn with_page(self, page: Page<Professional>) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.page.lock().unwrap() = page;
        }
        self
    }

    /// Add artificial latency to every search.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn with_latency(self, latency: Duration) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.latency.lock().unwrap() = Some(latency);
        }
        self
    }

    /// Make every search fail.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn failing(self) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.should_succeed.lock().unwrap() = false;
        }
        self
    }

    /// Queries received so far, in arrival order.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn queries(&self) -> Vec<SearchQuery> {
        #[allow(clippy::unwrap_used)]
        let queries = self.queries.lock().unwrap().clone();
        queries
    }

    /// Number of searches performed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.queries().len()
    }
}

impl ProfessionalDirectory for MockDirectory {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Page<Professional>>> + Send {
        #[allow(clippy::unwrap_used)]
        self.queries.lock().unwrap().push(query.clone());
        #[allow(clippy::unwrap_used)]
        let latency = *self.latency.lock().unwrap();
        #[allow(clippy::unwrap_used)]
        let succeed = *self.should_succeed.lock().unwrap();
        #[allow(clippy::unwrap_used)]
        let page = self.page.lock().unwrap().clone();

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            if succeed {
                Ok(page)
            } else {
                Err(ClientError::Network {
                    status: Some(500),
                    message: "directory unavailable".to_string(),
                })
            }
        }
    }
}
