//! Backend accounts API trait and payload types.

use crate::error::Result;
use crate::state::{FormData, PortfolioImage, ProfessionalFormData};
use crate::work_hours::WeekSchedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

/// Address block of a registration/update payload. Digits-only CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    /// CEP, digits only.
    pub cep: String,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Complement (may be empty).
    pub complement: String,
    /// District.
    pub district: String,
    /// City.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
}

/// Artist block of a registration/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalPayload {
    /// Experience bracket identifier.
    pub experience: String,
    /// Selected specialty names.
    pub specialties: Vec<String>,
    /// Platform name → link.
    pub social_links: BTreeMap<String, String>,
    /// Weekly availability.
    pub work_hours: WeekSchedule,
    /// Portfolio images.
    pub portfolio: Vec<PortfolioImage>,
    /// Service name → price.
    pub services: BTreeMap<String, f64>,
}

/// Registration / profile-update payload sent to the backend.
///
/// Masked fields are normalized to digits before leaving the client; the
/// artist block is present only for artist accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    /// Account role identifier.
    pub role: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// CPF, digits only.
    pub cpf: String,
    /// Email address.
    pub email: String,
    /// Phone, digits only.
    pub phone: String,
    /// Birth date, `DD/MM/YYYY`.
    pub birth_date: String,
    /// Address block.
    pub address: AddressPayload,
    /// New password, when set or changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Current password, required by the backend for a password change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    /// Artist block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<ProfessionalPayload>,
}

/// Stored profile, as fetched for edit-mode hydration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Shared form fields.
    pub form: FormData,
    /// Artist form fields (defaulted for clients).
    pub professional: ProfessionalFormData,
}

/// Two-factor secret issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorSecret {
    /// Base32 secret for manual entry.
    pub secret: String,
    /// `otpauth://` URL for the QR code.
    pub otpauth_url: String,
}

/// Appointment-history document rendered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Suggested file name.
    pub file_name: String,
    /// Base64-encoded PDF bytes.
    pub base64: String,
}

/// The REST backend, as the account flows see it.
///
/// Bearer-token injection and status-code mapping are implementation
/// concerns; callers only see [`crate::ClientError`] values.
pub trait AccountsApi: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns a network error, or a validation-shaped backend rejection
    /// (duplicate email/CPF).
    fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Update the stored profile.
    ///
    /// # Errors
    ///
    /// Returns a network error, a backend rejection, or
    /// [`crate::ClientError::SessionExpired`].
    fn update_profile(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the stored profile for edit-mode hydration.
    ///
    /// # Errors
    ///
    /// Returns a network error or [`crate::ClientError::SessionExpired`].
    fn fetch_profile(&self) -> impl Future<Output = Result<StoredProfile>> + Send;

    /// Ask the backend to issue a two-factor secret.
    ///
    /// # Errors
    ///
    /// Returns a network error or [`crate::ClientError::SessionExpired`].
    fn request_two_factor_secret(
        &self,
    ) -> impl Future<Output = Result<TwoFactorSecret>> + Send;

    /// Confirm two-factor setup with the user's first code.
    ///
    /// # Errors
    ///
    /// Returns a backend rejection for a wrong code; recoverable.
    fn confirm_two_factor(&self, code: &str) -> impl Future<Output = Result<()>> + Send;

    /// Turn two-factor off.
    ///
    /// # Errors
    ///
    /// Returns a network error or [`crate::ClientError::SessionExpired`].
    fn disable_two_factor(&self) -> impl Future<Output = Result<()>> + Send;

    /// Send a recovery code to the account email.
    ///
    /// # Errors
    ///
    /// Returns a network error; the caller races this against its own
    /// deadline.
    fn send_recovery_code(&self) -> impl Future<Output = Result<()>> + Send;

    /// Re-send the account verification email.
    ///
    /// # Errors
    ///
    /// Returns a network error; the caller races this against its own
    /// deadline.
    fn send_verification_email(&self) -> impl Future<Output = Result<()>> + Send;

    /// Verify a recovery code.
    ///
    /// # Errors
    ///
    /// Returns a backend rejection for a wrong code; recoverable.
    fn verify_recovery_code(&self, code: &str)
        -> impl Future<Output = Result<()>> + Send;

    /// Render the appointment history for a period.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::NotFound`] when the period has no
    /// completed appointments.
    fn export_history(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<ExportDocument>> + Send;
}
