//! Flow state types.
//!
//! All types are `Clone` to support the functional architecture pattern:
//! one store owns one flow's state for the lifetime of its screen, and the
//! state is discarded with the screen.

use crate::address::{AddressMismatch, PostalAddress};
use crate::tabs::Tab;
use crate::work_hours::{ScheduleError, WeekSchedule};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a professional in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfessionalId(pub uuid::Uuid);

impl ProfessionalId {
    /// Generate a new random `ProfessionalId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ProfessionalId {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Roles and Modes
// ═══════════════════════════════════════════════════════════════════════

/// Account role; decides the wizard's tab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular client booking sessions.
    Client,
    /// Tattoo artist offering sessions.
    Artist,
}

impl Role {
    /// Role name as the backend expects it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Artist => "artist",
        }
    }
}

/// Whether the wizard registers a new account or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardMode {
    /// New account; credentials and terms are mandatory.
    Registration,
    /// Editing a hydrated profile; password change is optional.
    EditProfile,
}

// ═══════════════════════════════════════════════════════════════════════
// Notices
// ═══════════════════════════════════════════════════════════════════════

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Something succeeded.
    Success,
    /// Blocked action or prerequisite not met.
    Warning,
    /// Failed validation or operation.
    Error,
}

/// A user-facing message held on state.
///
/// Reducers and validators never render anything; the single dispatcher
/// component watches this value and presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text (pt-BR).
    pub text: String,
}

impl Notice {
    /// Build an error notice.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// Build a warning notice.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    /// Build a success notice.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Wizard Form Data
// ═══════════════════════════════════════════════════════════════════════

/// Personal, address and credential fields shared by both roles.
///
/// Field values hold the masked display strings produced by the
/// formatters; validators strip the masks on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// CPF, masked `000.000.000-00`.
    pub cpf: String,
    /// Email address.
    pub email: String,
    /// Mobile phone, masked `(00) 00000-0000`.
    pub phone: String,
    /// Birth date, masked `DD/MM/YYYY`.
    pub birth_date: String,

    /// CEP, masked `00000-000`.
    pub cep: String,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Address complement (optional).
    pub complement: String,
    /// District.
    pub district: String,
    /// City.
    pub city: String,
    /// Two-letter state code.
    pub state: String,

    /// Current password (edit mode only).
    pub current_password: String,
    /// New password.
    pub new_password: String,
    /// New password confirmation.
    pub confirm_password: String,
    /// Terms-of-use acceptance.
    pub terms_accepted: bool,
}

/// Experience bracket an artist selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBracket {
    /// Less than one year.
    UpToOneYear,
    /// One to three years.
    OneToThreeYears,
    /// Three to five years.
    ThreeToFiveYears,
    /// Five to ten years.
    FiveToTenYears,
    /// More than ten years.
    OverTenYears,
}

impl ExperienceBracket {
    /// Bracket identifier as the backend expects it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpToOneYear => "up_to_1_year",
            Self::OneToThreeYears => "1_to_3_years",
            Self::ThreeToFiveYears => "3_to_5_years",
            Self::FiveToTenYears => "5_to_10_years",
            Self::OverTenYears => "over_10_years",
        }
    }
}

/// Social-media link platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocialPlatform {
    /// Instagram handle/URL.
    Instagram,
    /// Facebook page.
    Facebook,
    /// TikTok handle/URL.
    TikTok,
    /// Personal website.
    Website,
}

impl SocialPlatform {
    /// Display name of the platform.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::TikTok => "TikTok",
            Self::Website => "Site",
        }
    }

    /// All platforms in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Instagram, Self::Facebook, Self::TikTok, Self::Website]
    }
}

/// One portfolio image, as picked from the device gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioImage {
    /// Device URI of the picked image.
    pub uri: String,
    /// Base64-encoded payload for upload.
    pub base64: String,
    /// MIME type (e.g. `image/jpeg`).
    pub mime_type: String,
    /// Original file name.
    pub name: String,
}

/// Artist-only form data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalFormData {
    /// Selected experience bracket.
    pub experience: Option<ExperienceBracket>,
    /// Specialty name → selected.
    pub specialties: BTreeMap<String, bool>,
    /// Platform → link text (each independently optional, length-capped).
    pub social_links: BTreeMap<SocialPlatform, String>,
    /// Weekly availability.
    pub work_hours: WeekSchedule,
    /// Portfolio images in display order.
    pub portfolio: Vec<PortfolioImage>,
    /// Offered service type → price input (raw text).
    pub services: BTreeMap<String, String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Wizard State
// ═══════════════════════════════════════════════════════════════════════

/// Root wizard state for the registration / edit-profile screens.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    /// Registration or edit mode.
    pub mode: WizardMode,
    /// Role deciding the tab set.
    pub role: Role,
    /// Currently displayed tab.
    pub active_tab: Tab,
    /// Shared form fields.
    pub form: FormData,
    /// Artist-only form fields.
    pub professional: ProfessionalFormData,
    /// Last successful postal lookup, if any.
    pub lookup: Option<PostalAddress>,
    /// Address fields currently disagreeing with the lookup; recomputed on
    /// every relevant change, never cached across edits.
    pub address_mismatches: Vec<AddressMismatch>,
    /// A CEP lookup request is in flight.
    pub looking_up_cep: bool,
    /// A submit request is in flight.
    pub submitting: bool,
    /// The submit completed; the screen can navigate away.
    pub submitted: bool,
    /// The session expired; the shell must return to login.
    pub logged_out: bool,
    /// Current user-facing message, if any.
    pub notice: Option<Notice>,
    /// Outcome of the last hours-tab validation, kept for the silent
    /// malformed-schedule case.
    pub last_schedule_error: Option<ScheduleError>,
}

impl WizardState {
    /// Fresh registration state with empty fields.
    #[must_use]
    pub fn registration(role: Role) -> Self {
        Self {
            mode: WizardMode::Registration,
            role,
            active_tab: Tab::Personal,
            form: FormData::default(),
            professional: ProfessionalFormData::default(),
            lookup: None,
            address_mismatches: Vec::new(),
            looking_up_cep: false,
            submitting: false,
            submitted: false,
            logged_out: false,
            notice: None,
            last_schedule_error: None,
        }
    }

    /// Edit-profile state awaiting hydration from the backend.
    #[must_use]
    pub fn edit_profile(role: Role) -> Self {
        Self {
            mode: WizardMode::EditProfile,
            ..Self::registration(role)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Directory Search
// ═══════════════════════════════════════════════════════════════════════

/// A professional as listed by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    /// Directory id.
    pub id: ProfessionalId,
    /// Display name.
    pub name: String,
    /// City shown on the card.
    pub city: String,
    /// Specialties shown on the card.
    pub specialties: Vec<String>,
    /// Average rating, 0–5.
    pub rating: f32,
    /// Number of ratings.
    pub rating_count: u32,
}

/// One page of directory results, as the backend shapes it
/// (`{content, totalPages, totalElements, hasNext, hasPrevious}` on the
/// wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total matching items.
    pub total_elements: u64,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// An empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Directory sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Backend relevance order.
    Relevance,
    /// Best rated first.
    Rating,
    /// Alphabetical.
    Name,
}

impl SortKey {
    /// Sort identifier as the backend expects it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Rating => "rating",
            Self::Name => "name",
        }
    }
}

/// Current directory filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Free-text search term.
    pub term: String,
    /// Location term.
    pub location: String,
    /// Minimum rating, if restricted.
    pub min_rating: Option<f32>,
    /// Selected specialty names.
    pub specialties: BTreeSet<String>,
    /// Sort key.
    pub sort: SortKey,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            term: String::new(),
            location: String::new(),
            min_rating: None,
            specialties: BTreeSet::new(),
            sort: SortKey::Relevance,
        }
    }
}

/// Phase of the search fetch state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing pending.
    Idle,
    /// A debounce timer is running.
    Debouncing,
    /// A fetch is in flight.
    Fetching,
}

/// Root state for the professional-directory search screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Current filters.
    pub filters: SearchFilters,
    /// Zero-based page index.
    pub page_index: u32,
    /// Fetch state machine phase.
    pub phase: SearchPhase,
    /// Debounce timer generation; a firing with a stale generation is
    /// ignored, which is what makes the debounce trailing-edge.
    pub debounce_generation: u64,
    /// A fetch finished arming while another was in flight; dispatch again
    /// on completion instead of cancelling.
    pub refetch_pending: bool,
    /// Last fetched page; cleared on failure.
    pub page: Page<Professional>,
    /// Current user-facing message, if any.
    pub notice: Option<Notice>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            page_index: 0,
            phase: SearchPhase::Idle,
            debounce_generation: 0,
            refetch_pending: false,
            page: Page::empty(),
            notice: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Account State
// ═══════════════════════════════════════════════════════════════════════

/// Two-factor setup phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwoFactorPhase {
    /// Two-factor is off.
    Disabled,
    /// Waiting for the backend to issue a secret.
    PendingSecret,
    /// Secret issued; waiting for the user's first code.
    AwaitingCode {
        /// Base32 secret to show for manual entry.
        secret: String,
        /// `otpauth://` URL encoded into the QR code.
        otpauth_url: String,
    },
    /// Two-factor is on.
    Enabled,
}

/// Phase of a deadline-raced email operation (recovery code,
/// verification re-send).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPhase {
    /// No send pending.
    Idle,
    /// Send in flight (racing its deadline).
    Sending,
    /// Email sent; any follow-up code entry happens from here.
    Sent,
}

/// Appointment-history export phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    /// No export pending.
    Idle,
    /// Waiting for the backend to render the document.
    Requesting,
    /// Document received; handing to the share surface.
    Sharing,
}

/// Root state for the account settings screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    /// Two-factor setup phase.
    pub two_factor: TwoFactorPhase,
    /// Recovery email phase.
    pub recovery: EmailPhase,
    /// Verification email phase.
    pub verification: EmailPhase,
    /// Export phase.
    pub export: ExportPhase,
    /// The session expired; the shell must return to login.
    pub logged_out: bool,
    /// Current user-facing message, if any.
    pub notice: Option<Notice>,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            two_factor: TwoFactorPhase::Disabled,
            recovery: EmailPhase::Idle,
            verification: EmailPhase::Idle,
            export: ExportPhase::Idle,
            logged_out: false,
            notice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_id_generation() {
        assert_ne!(ProfessionalId::new(), ProfessionalId::new());
    }

    #[test]
    fn test_role_str() {
        assert_eq!(Role::Client.as_str(), "client");
        assert_eq!(Role::Artist.as_str(), "artist");
    }

    #[test]
    fn test_registration_state_starts_on_personal() {
        let state = WizardState::registration(Role::Artist);
        assert_eq!(state.active_tab, Tab::Personal);
        assert!(state.notice.is_none());
        assert!(!state.submitted);
    }

    #[test]
    fn test_week_default_is_closed() {
        let state = WizardState::registration(Role::Artist);
        assert!(!state.professional.work_hours.has_any_window());
        assert_eq!(state.professional.work_hours.days.len(), 7);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<Professional> = Page::empty();
        assert!(page.content.is_empty());
        assert!(!page.has_next);
    }
}
