//! Flow actions.
//!
//! Actions are the only way to drive the flows: commands express user
//! intent (a keystroke, a tab press, a submit) and events carry the results
//! of async effects back into the reducer. Screens dispatch commands;
//! only effect execution produces events.

use crate::address::PostalAddress;
use crate::error::ClientError;
use crate::providers::ExportDocument;
use crate::state::{
    ExperienceBracket, FormData, Page, PortfolioImage, Professional,
    ProfessionalFormData, SocialPlatform, SortKey,
};
use crate::tabs::Tab;
use crate::work_hours::PeriodKind;
use chrono::NaiveDate;

/// Form fields updated through [`WizardAction::FieldChanged`].
///
/// The reducer applies the matching progressive mask before storing the
/// value; fields without a mask are stored as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// First name.
    FirstName,
    /// Last name.
    LastName,
    /// CPF (masked).
    Cpf,
    /// Email address.
    Email,
    /// Mobile phone (masked).
    Phone,
    /// Birth date (masked).
    BirthDate,
    /// CEP (masked; completing 8 digits triggers the lookup).
    Cep,
    /// Street name.
    Street,
    /// Street number.
    Number,
    /// Address complement.
    Complement,
    /// District.
    District,
    /// City.
    City,
    /// State code.
    State,
    /// Current password.
    CurrentPassword,
    /// New password.
    NewPassword,
    /// New password confirmation.
    ConfirmPassword,
}

/// Which end of a work-hours window a time edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    /// Opening time.
    Start,
    /// Closing time.
    End,
}

/// Wizard action: registration / edit-profile flow inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    // ═══════════════════════════════════════════════════════════════════
    // Field edits
    // ═══════════════════════════════════════════════════════════════════
    /// A text field changed.
    FieldChanged {
        /// Which field.
        field: FormField,
        /// Raw input value, masked by the reducer.
        value: String,
    },

    /// Terms-of-use checkbox toggled.
    TermsToggled {
        /// New value.
        accepted: bool,
    },

    /// Artist experience bracket selected.
    ExperienceSelected {
        /// Chosen bracket.
        bracket: ExperienceBracket,
    },

    /// Artist specialty toggled.
    SpecialtyToggled {
        /// Specialty name.
        name: String,
        /// New value.
        selected: bool,
    },

    /// Artist social-media link edited.
    SocialLinkChanged {
        /// Which platform.
        platform: SocialPlatform,
        /// Link text.
        value: String,
    },

    /// Day availability toggled on the hours tab.
    ///
    /// Turning a day off also disables both of its windows.
    DayAvailabilityToggled {
        /// Index into the week (0 = Segunda).
        day_index: usize,
    },

    /// A half-day window toggled; no-op on an unavailable day.
    PeriodToggled {
        /// Index into the week.
        day_index: usize,
        /// Which window.
        period: PeriodKind,
    },

    /// A window's start or end time edited.
    PeriodTimeChanged {
        /// Index into the week.
        day_index: usize,
        /// Which window.
        period: PeriodKind,
        /// Start or end.
        bound: TimeBound,
        /// Raw `HH:MM` input.
        value: String,
    },

    /// Portfolio image picked.
    PortfolioImageAdded {
        /// The picked image.
        image: PortfolioImage,
    },

    /// Portfolio image removed.
    PortfolioImageRemoved {
        /// Index into the portfolio list.
        index: usize,
    },

    /// Service type offered.
    ServiceSelected {
        /// Service name.
        name: String,
    },

    /// Service type withdrawn.
    ServiceRemoved {
        /// Service name.
        name: String,
    },

    /// Service price edited.
    ServicePriceChanged {
        /// Service name.
        name: String,
        /// Raw price input.
        price: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Hydration (edit mode)
    // ═══════════════════════════════════════════════════════════════════
    /// Fetch the stored profile to hydrate the form.
    LoadRequested,

    /// Profile fetched (**event**).
    ProfileLoaded {
        /// Hydrated shared fields.
        form: FormData,
        /// Hydrated artist fields.
        professional: ProfessionalFormData,
    },

    /// Profile fetch failed (**event**).
    LoadFailed {
        /// What went wrong.
        error: ClientError,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Postal lookup
    // ═══════════════════════════════════════════════════════════════════
    /// CEP lookup succeeded (**event**); auto-fills the address fields.
    CepLookupSucceeded {
        /// Lookup result.
        address: PostalAddress,
    },

    /// CEP lookup failed (**event**).
    CepLookupFailed {
        /// What went wrong.
        error: ClientError,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Navigation
    // ═══════════════════════════════════════════════════════════════════
    /// A tab header was tapped.
    TabPressed {
        /// Target tab.
        tab: Tab,
    },

    /// "Next" pressed on the active tab.
    NextPressed,

    /// "Back" pressed on the active tab.
    PrevPressed,

    // ═══════════════════════════════════════════════════════════════════
    // Submission
    // ═══════════════════════════════════════════════════════════════════
    /// Submit pressed on the last tab.
    SubmitPressed,

    /// Backend accepted the registration/update (**event**).
    SubmitSucceeded,

    /// Backend rejected the registration/update (**event**).
    SubmitFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// The current notice was dismissed.
    NoticeDismissed,
}

/// Search action: professional-directory flow inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    /// Free-text term changed.
    TermChanged {
        /// New term.
        term: String,
    },

    /// Location term changed.
    LocationChanged {
        /// New location.
        location: String,
    },

    /// Minimum rating filter changed.
    MinRatingChanged {
        /// New minimum, or `None` to clear.
        rating: Option<f32>,
    },

    /// Specialty filter toggled.
    SpecialtyToggled {
        /// Specialty name.
        name: String,
        /// New value.
        selected: bool,
    },

    /// Sort key changed; forces a page-0 refetch even when already there.
    SortChanged {
        /// New sort key.
        sort: SortKey,
    },

    /// Explicit pagination forward.
    NextPage,

    /// Explicit pagination backward.
    PrevPage,

    /// The debounce timer fired (**event**).
    ///
    /// Carries the generation it was armed with; stale firings are
    /// ignored, making the debounce trailing-edge.
    DebounceElapsed {
        /// Generation at arming time.
        generation: u64,
    },

    /// Directory fetch succeeded (**event**).
    FetchSucceeded {
        /// The fetched page.
        page: Page<Professional>,
    },

    /// Directory fetch failed (**event**).
    FetchFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// The current notice was dismissed.
    NoticeDismissed,
}

/// Account action: two-factor, recovery, and export flow inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountAction {
    // ═══════════════════════════════════════════════════════════════════
    // Two-factor setup
    // ═══════════════════════════════════════════════════════════════════
    /// Start two-factor setup.
    TwoFactorSetupRequested,

    /// Backend issued the secret (**event**).
    TwoFactorSecretIssued {
        /// Base32 secret for manual entry.
        secret: String,
        /// `otpauth://` URL for the QR code.
        otpauth_url: String,
    },

    /// Secret issuance failed (**event**).
    TwoFactorSetupFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// User submitted a 6-digit code.
    TwoFactorCodeSubmitted {
        /// The code.
        code: String,
    },

    /// Backend confirmed the code (**event**).
    TwoFactorConfirmed,

    /// Backend rejected the code (**event**); recoverable.
    TwoFactorRejected {
        /// What went wrong.
        error: ClientError,
    },

    /// Turn two-factor off.
    TwoFactorDisableRequested,

    /// Two-factor disabled (**event**).
    TwoFactorDisabled,

    /// Disabling failed (**event**).
    TwoFactorDisableFailed {
        /// What went wrong.
        error: ClientError,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Recovery code fallback
    // ═══════════════════════════════════════════════════════════════════
    /// Request a recovery code by email.
    RecoveryCodeRequested,

    /// Recovery email accepted by the backend (**event**).
    RecoveryCodeSent,

    /// The send outlived its deadline (**event**).
    ///
    /// Distinct from [`AccountAction::RecoveryEmailFailed`]: the request
    /// was abandoned, not aborted.
    RecoveryEmailTimedOut,

    /// The send failed (**event**).
    RecoveryEmailFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// User submitted a recovery code.
    RecoveryCodeSubmitted {
        /// The code.
        code: String,
    },

    /// Backend accepted the recovery code (**event**).
    RecoveryConfirmed,

    /// Re-send the account verification email.
    VerificationEmailRequested,

    /// Verification email accepted by the backend (**event**).
    VerificationEmailSent,

    /// The verification send outlived its deadline (**event**).
    VerificationEmailTimedOut,

    /// The verification send failed (**event**).
    VerificationEmailFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// Backend rejected the recovery code (**event**); recoverable.
    RecoveryRejected {
        /// What went wrong.
        error: ClientError,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Appointment-history export
    // ═══════════════════════════════════════════════════════════════════
    /// Export the appointment history for a period.
    ExportRequested {
        /// Period start.
        from: NaiveDate,
        /// Period end.
        to: NaiveDate,
    },

    /// Backend rendered the document (**event**).
    ExportDocumentReady {
        /// The rendered document.
        document: ExportDocument,
    },

    /// Document handed to the share surface (**event**).
    ExportShared,

    /// Export or share failed (**event**).
    ExportFailed {
        /// What went wrong.
        error: ClientError,
    },

    /// The current notice was dismissed.
    NoticeDismissed,
}
