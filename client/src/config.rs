//! Client configuration.
//!
//! Configuration values are provided by the application shell, not
//! hardcoded in reducers: the API base URL depends on build environment and
//! runtime platform, and the timing knobs (debounce interval, per-operation
//! email timeouts) are fixed product decisions that tests shrink.

use std::time::Duration;

/// Build environment the client was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnvironment {
    /// Local development against a backend on the developer machine.
    Development,
    /// Staging backend.
    Staging,
    /// Production backend.
    Production,
}

/// Runtime platform the client is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Browser build.
    Web,
    /// Mobile build.
    Native,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Build environment.
    pub environment: BuildEnvironment,

    /// Runtime platform.
    pub platform: Platform,

    /// Trailing-edge debounce applied to directory-search filter changes.
    ///
    /// Default: 300ms
    pub search_debounce: Duration,

    /// Directory-search page size.
    ///
    /// Default: 10
    pub search_page_size: u32,

    /// Deadline for the recovery-code email operation.
    ///
    /// Default: 15 seconds
    pub recovery_email_timeout: Duration,

    /// Deadline for the verification email operation.
    ///
    /// Default: 25 seconds
    pub verification_email_timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given environment and platform.
    #[must_use]
    pub const fn new(environment: BuildEnvironment, platform: Platform) -> Self {
        Self {
            environment,
            platform,
            search_debounce: Duration::from_millis(300),
            search_page_size: 10,
            recovery_email_timeout: Duration::from_secs(15),
            verification_email_timeout: Duration::from_secs(25),
        }
    }

    /// Base URL of the REST backend for this environment/platform pair.
    ///
    /// The development native build talks to the Android emulator's host
    /// loopback; every other combination is a plain hostname.
    #[must_use]
    pub const fn api_base_url(&self) -> &'static str {
        match (self.environment, self.platform) {
            (BuildEnvironment::Development, Platform::Web) => "http://localhost:8080/api",
            (BuildEnvironment::Development, Platform::Native) => "http://10.0.2.2:8080/api",
            (BuildEnvironment::Staging, _) => "https://staging.api.inkbook.app/api",
            (BuildEnvironment::Production, _) => "https://api.inkbook.app/api",
        }
    }

    /// Set the search debounce interval.
    #[must_use]
    pub const fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// Set the directory-search page size.
    #[must_use]
    pub const fn with_search_page_size(mut self, size: u32) -> Self {
        self.search_page_size = size;
        self
    }

    /// Set the recovery-code email deadline.
    #[must_use]
    pub const fn with_recovery_email_timeout(mut self, timeout: Duration) -> Self {
        self.recovery_email_timeout = timeout;
        self
    }

    /// Set the verification email deadline.
    #[must_use]
    pub const fn with_verification_email_timeout(mut self, timeout: Duration) -> Self {
        self.verification_email_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(BuildEnvironment::Development, Platform::Native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_selection() {
        let dev_native = ClientConfig::new(BuildEnvironment::Development, Platform::Native);
        assert_eq!(dev_native.api_base_url(), "http://10.0.2.2:8080/api");

        let dev_web = ClientConfig::new(BuildEnvironment::Development, Platform::Web);
        assert_eq!(dev_web.api_base_url(), "http://localhost:8080/api");

        let prod = ClientConfig::new(BuildEnvironment::Production, Platform::Web);
        assert_eq!(prod.api_base_url(), "https://api.inkbook.app/api");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.search_page_size, 10);
        assert_eq!(config.recovery_email_timeout, Duration::from_secs(15));
        assert_eq!(config.verification_email_timeout, Duration::from_secs(25));
    }
}
