//! Mock file share for testing.

use crate::error::{ClientError, Result};
use crate::providers::FileShare;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock file share.
///
/// Records every shared document instead of touching the filesystem.
#[derive(Debug, Clone)]
pub struct MockFileShare {
    shared: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    should_succeed: Arc<Mutex<bool>>,
}

impl MockFileShare {
    /// Create a mock that accepts every share.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::default(),
            should_succeed: Arc::new(Mutex::new(true)),
        }
    }

    /// Make every share fail.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn failing(self) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.should_succeed.lock().unwrap() = false;
        }
        self
    }

    /// Documents shared so far, as `(file_name, bytes)` pairs.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn shared(&self) -> Vec<(String, Vec<u8>)> {
        #[allow(clippy::unwrap_used)]
        let shared = self.shared.lock().unwrap().clone();
        shared
    }
}

impl FileShare for MockFileShare {
    fn save_and_share(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<()>> + Send {
        #[allow(clippy::unwrap_used)]
        let succeed = *self.should_succeed.lock().unwrap();
        if succeed {
            #[allow(clippy::unwrap_used)]
            self.shared
                .lock()
                .unwrap()
                .push((file_name.to_string(), bytes));
        }

        async move {
            if succeed {
                Ok(())
            } else {
                Err(ClientError::Share("share surface unavailable".to_string()))
            }
        }
    }
}
