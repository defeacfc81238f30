//! Device file/share surface.

use crate::error::{ClientError, Result};
use std::future::Future;
use std::path::PathBuf;

/// The device file/share surface.
///
/// On native builds the document is written to a local file and hauled
/// through the platform share sheet; on web it becomes a direct download.
pub trait FileShare: Send + Sync {
    /// Persist the document bytes and hand them to the share surface.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Share`] when the file cannot be written or
    /// the share surface rejects it.
    fn save_and_share(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// File share writing into the device cache directory.
#[derive(Debug, Clone)]
pub struct DeviceFileShare {
    directory: PathBuf,
}

impl DeviceFileShare {
    /// Share from the given writable directory.
    #[must_use]
    pub const fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

impl Default for DeviceFileShare {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl FileShare for DeviceFileShare {
    fn save_and_share(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<()>> + Send {
        let path = self.directory.join(file_name);

        async move {
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|e| ClientError::Share(e.to_string()))?;

            tracing::info!(path = %path.display(), "document written, invoking share sheet");
            Ok(())
        }
    }
}
