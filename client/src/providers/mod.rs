//! Provider traits for external collaborators.
//!
//! Every collaborator of the client flows sits behind a trait:
//!
//! - [`AccountsApi`]: the REST backend (registration, profile, two-factor,
//!   recovery emails, history export)
//! - [`ProfessionalDirectory`]: the paged directory search endpoint
//! - [`PostalLookup`]: the CEP lookup service
//! - [`FileShare`]: the device file/share surface
//!
//! HTTP implementations live next to the traits; mocks live in
//! [`crate::mocks`].

mod accounts;
mod directory;
mod http;
mod postal;
mod share;
mod via_cep;

pub use accounts::{
    AccountsApi, AddressPayload, ExportDocument, ProfessionalPayload,
    RegistrationPayload, StoredProfile, TwoFactorSecret,
};
pub use directory::{ProfessionalDirectory, SearchQuery};
pub use http::{HttpAccountsApi, HttpDirectory};
pub use postal::PostalLookup;
pub use share::{DeviceFileShare, FileShare};
pub use via_cep::ViaCep;
