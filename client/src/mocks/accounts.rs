//! Mock accounts API for testing.

use crate::error::{ClientError, Result};
use crate::providers::{
    AccountsApi, ExportDocument, RegistrationPayload, StoredProfile, TwoFactorSecret,
};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Code the mock accepts for two-factor and recovery verification.
pub const ACCEPTED_CODE: &str = "123456";

#[derive(Debug, Default)]
struct Inner {
    register_calls: AtomicUsize,
    update_calls: AtomicUsize,
    recovery_send_calls: AtomicUsize,
    verification_send_calls: AtomicUsize,
    fail_with: Mutex<Option<ClientError>>,
    email_latency: Mutex<Option<Duration>>,
    profile: Mutex<StoredProfile>,
    export: Mutex<Option<ExportDocument>>,
    last_payload: Mutex<Option<RegistrationPayload>>,
}

/// Mock accounts API.
///
/// Succeeds by default; scriptable to fail every call with a given error
/// or to stall the recovery-email send. Verification accepts
/// [`ACCEPTED_CODE`] and rejects anything else, which keeps the
/// retry-or-fallback paths testable.
#[derive(Debug, Clone, Default)]
pub struct MockAccountsApi {
    inner: Arc<Inner>,
}

impl MockAccountsApi {
    /// Create a mock where every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with the given error.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn failing(self, error: ClientError) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.inner.fail_with.lock().unwrap() = Some(error);
        }
        self
    }

    /// Stall every email send by the given latency.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn with_email_latency(self, latency: Duration) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.inner.email_latency.lock().unwrap() = Some(latency);
        }
        self
    }

    /// Script the stored profile returned by `fetch_profile`.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn with_profile(self, profile: StoredProfile) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.inner.profile.lock().unwrap() = profile;
        }
        self
    }

    /// Script the export document; without one, export is not-found.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn with_export_document(self, document: ExportDocument) -> Self {
        #[allow(clippy::unwrap_used)]
        {
            *self.inner.export.lock().unwrap() = Some(document);
        }
        self
    }

    /// Number of `register` calls.
    #[must_use]
    pub fn register_calls(&self) -> usize {
        self.inner.register_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_profile` calls.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.inner.update_calls.load(Ordering::SeqCst)
    }

    /// Number of `send_recovery_code` calls.
    #[must_use]
    pub fn recovery_send_calls(&self) -> usize {
        self.inner.recovery_send_calls.load(Ordering::SeqCst)
    }

    /// Number of `send_verification_email` calls.
    #[must_use]
    pub fn verification_send_calls(&self) -> usize {
        self.inner.verification_send_calls.load(Ordering::SeqCst)
    }

    /// The last payload received by `register`/`update_profile`.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // mutex poisoning only
    pub fn last_payload(&self) -> Option<RegistrationPayload> {
        #[allow(clippy::unwrap_used)]
        let payload = self.inner.last_payload.lock().unwrap().clone();
        payload
    }

    fn scripted_failure(&self) -> Option<ClientError> {
        #[allow(clippy::unwrap_used)]
        let failure = self.inner.fail_with.lock().unwrap().clone();
        failure
    }
}

impl AccountsApi for MockAccountsApi {
    fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<()>> + Send {
        self.inner.register_calls.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::unwrap_used)]
        {
            *self.inner.last_payload.lock().unwrap() = Some(payload.clone());
        }
        let failure = self.scripted_failure();

        async move {
            match failure {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn update_profile(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<()>> + Send {
        self.inner.update_calls.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::unwrap_used)]
        {
            *self.inner.last_payload.lock().unwrap() = Some(payload.clone());
        }
        let failure = self.scripted_failure();

        async move {
            match failure {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn fetch_profile(&self) -> impl Future<Output = Result<StoredProfile>> + Send {
        let failure = self.scripted_failure();
        #[allow(clippy::unwrap_used)]
        let profile = self.inner.profile.lock().unwrap().clone();

        async move {
            match failure {
                Some(error) => Err(error),
                None => Ok(profile),
            }
        }
    }

    fn request_two_factor_secret(
        &self,
    ) -> impl Future<Output = Result<TwoFactorSecret>> + Send {
        let failure = self.scripted_failure();

        async move {
            match failure {
                Some(error) => Err(error),
                None => Ok(TwoFactorSecret {
                    secret: "JBSWY3DPEHPK3PXP".to_string(),
                    otpauth_url:
                        "otpauth://totp/Inkbook:ana@example.com?secret=JBSWY3DPEHPK3PXP"
                            .to_string(),
                }),
            }
        }
    }

    fn confirm_two_factor(&self, code: &str) -> impl Future<Output = Result<()>> + Send {
        let failure = self.scripted_failure();
        let accepted = code == ACCEPTED_CODE;

        async move {
            match failure {
                Some(error) => Err(error),
                None if accepted => Ok(()),
                None => Err(ClientError::Validation {
                    field: "code".to_string(),
                    message: "Código inválido".to_string(),
                }),
            }
        }
    }

    fn disable_two_factor(&self) -> impl Future<Output = Result<()>> + Send {
        let failure = self.scripted_failure();

        async move {
            match failure {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn send_recovery_code(&self) -> impl Future<Output = Result<()>> + Send {
        self.inner.recovery_send_calls.fetch_add(1, Ordering::SeqCst);
        let failure = self.scripted_failure();
        #[allow(clippy::unwrap_used)]
        let latency = *self.inner.email_latency.lock().unwrap();

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            match failure {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn send_verification_email(&self) -> impl Future<Output = Result<()>> + Send {
        self.inner
            .verification_send_calls
            .fetch_add(1, Ordering::SeqCst);
        let failure = self.scripted_failure();
        #[allow(clippy::unwrap_used)]
        let latency = *self.inner.email_latency.lock().unwrap();

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            match failure {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    fn verify_recovery_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let failure = self.scripted_failure();
        let accepted = code == ACCEPTED_CODE;

        async move {
            match failure {
                Some(error) => Err(error),
                None if accepted => Ok(()),
                None => Err(ClientError::Validation {
                    field: "code".to_string(),
                    message: "Código de recuperação inválido".to_string(),
                }),
            }
        }
    }

    fn export_history(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> impl Future<Output = Result<ExportDocument>> + Send {
        let failure = self.scripted_failure();
        #[allow(clippy::unwrap_used)]
        let document = self.inner.export.lock().unwrap().clone();

        async move {
            match failure {
                Some(error) => Err(error),
                None => document.ok_or(ClientError::NotFound {
                    what: "atendimentos concluídos no período".to_string(),
                }),
            }
        }
    }
}
