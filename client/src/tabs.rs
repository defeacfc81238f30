//! Wizard tabs: ordering, validation gate, and availability.
//!
//! One role-parameterized ordered tab list replaces the per-screen tab
//! sequences; next/prev/availability all derive from it plus the per-tab
//! validators below. Two validator families exist per tab:
//!
//! - a silent predicate ([`TabGate::is_valid`]) used to compute the
//!   unlocked-tab set and button enablement, and
//! - an imperative validator ([`TabGate::validate`]) run on "Next"/submit,
//!   which names the first failing field. Check order within a tab is fixed
//!   and short-circuits, which decides the single message the user sees.

use crate::address::check_consistency;
use crate::state::{
    FormData, ProfessionalFormData, Role, SocialPlatform, WizardMode, WizardState,
};
use crate::validate::{
    is_valid_cpf, is_valid_email, is_valid_password, is_valid_phone, name_within_limit,
    validate_birth_date, BirthDateError,
};
use crate::work_hours::{validate_week, ScheduleError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a social-media link.
pub const MAX_SOCIAL_LINK_LENGTH: usize = 100;

/// Wizard tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    /// Personal data (both roles).
    Personal,
    /// Address (both roles).
    Address,
    /// Artist basic info: experience, specialties, links, services.
    BasicInfo,
    /// Artist weekly work hours.
    Hours,
    /// Artist portfolio images.
    Portfolio,
    /// Credentials and terms (both roles).
    Security,
}

impl Tab {
    /// Tab identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Address => "address",
            Self::BasicInfo => "basic_info",
            Self::Hours => "hours",
            Self::Portfolio => "portfolio",
            Self::Security => "security",
        }
    }

    /// Display label (pt-BR), used in prerequisite warnings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Dados pessoais",
            Self::Address => "Endereço",
            Self::BasicInfo => "Informações básicas",
            Self::Hours => "Horários",
            Self::Portfolio => "Portfólio",
            Self::Security => "Segurança",
        }
    }
}

const CLIENT_TABS: [Tab; 3] = [Tab::Personal, Tab::Address, Tab::Security];

const ARTIST_TABS: [Tab; 6] = [
    Tab::Personal,
    Tab::Address,
    Tab::BasicInfo,
    Tab::Hours,
    Tab::Portfolio,
    Tab::Security,
];

/// The fixed tab order for a role.
#[must_use]
pub const fn order(role: Role) -> &'static [Tab] {
    match role {
        Role::Client => &CLIENT_TABS,
        Role::Artist => &ARTIST_TABS,
    }
}

/// Next tab after `current` in the role's order.
#[must_use]
pub fn next_tab(role: Role, current: Tab) -> Option<Tab> {
    let order = order(role);
    let index = order.iter().position(|t| *t == current)?;
    order.get(index + 1).copied()
}

/// Previous tab before `current` in the role's order.
#[must_use]
pub fn prev_tab(role: Role, current: Tab) -> Option<Tab> {
    let order = order(role);
    let index = order.iter().position(|t| *t == current)?;
    index.checked_sub(1).map(|i| order[i])
}

/// The first failing field of a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabError {
    /// Field identifier the message refers to.
    pub field: &'static str,
    /// User-facing message (pt-BR).
    pub message: String,
}

impl TabError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validation gate over a wizard state snapshot.
///
/// Holds borrows only; construct it fresh for every query so the unlocked
/// set always reflects current form state.
pub struct TabGate<'a> {
    form: &'a FormData,
    professional: &'a ProfessionalFormData,
    state: &'a WizardState,
    mode: WizardMode,
    role: Role,
    now: DateTime<Utc>,
}

impl<'a> TabGate<'a> {
    /// Build a gate over the given wizard state at the given "now".
    #[must_use]
    pub fn new(state: &'a WizardState, now: DateTime<Utc>) -> Self {
        Self {
            form: &state.form,
            professional: &state.professional,
            state,
            mode: state.mode,
            role: state.role,
            now,
        }
    }

    /// Silent predicate: does `tab` currently validate?
    #[must_use]
    pub fn is_valid(&self, tab: Tab) -> bool {
        self.validate(tab).is_ok()
    }

    /// Imperative validator: first failing field of `tab`, if any.
    ///
    /// # Errors
    ///
    /// Returns the first [`TabError`] in the tab's fixed check order.
    pub fn validate(&self, tab: Tab) -> Result<(), TabError> {
        match tab {
            Tab::Personal => self.validate_personal(),
            Tab::Address => self.validate_address(),
            Tab::BasicInfo => self.validate_basic_info(),
            Tab::Hours => self.validate_hours(),
            Tab::Portfolio => self.validate_portfolio(),
            Tab::Security => self.validate_security(),
        }
    }

    /// Walk the role's tab order, unlocking strictly left-to-right.
    ///
    /// The first tab is always reachable; each further tab is included only
    /// while its predecessor's predicate holds. Recomputed from current
    /// form state on every call.
    #[must_use]
    pub fn available_tabs(&self) -> Vec<Tab> {
        let order = order(self.role);
        let mut available = vec![order[0]];

        for window in order.windows(2) {
            if self.is_valid(window[0]) {
                available.push(window[1]);
            } else {
                break;
            }
        }

        available
    }

    /// First tab before `target` in order whose predicate fails.
    #[must_use]
    pub fn first_unmet(&self, target: Tab) -> Option<Tab> {
        order(self.role)
            .iter()
            .take_while(|t| **t != target)
            .find(|t| !self.is_valid(**t))
            .copied()
    }

    /// Validate every tab in order; the first failure names its tab.
    ///
    /// # Errors
    ///
    /// Returns the failing tab and its first [`TabError`].
    pub fn validate_all(&self) -> Result<(), (Tab, TabError)> {
        for tab in order(self.role) {
            self.validate(*tab).map_err(|e| (*tab, e))?;
        }
        Ok(())
    }

    /// Hours-tab outcome with the schedule error kinds preserved.
    ///
    /// The wizard reducer needs to distinguish "no schedule at all" (raises
    /// a notice) from "malformed schedule" (blocks silently).
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found.
    pub fn schedule_outcome(&self) -> Result<(), ScheduleError> {
        validate_week(&self.professional.work_hours)
    }

    // ───────────────────────────────────────────────────────────────────
    // Per-tab checks, in their fixed order
    // ───────────────────────────────────────────────────────────────────

    fn validate_personal(&self) -> Result<(), TabError> {
        let form = self.form;

        if form.first_name.trim().is_empty() {
            return Err(TabError::new("first_name", "Informe o nome"));
        }
        if form.last_name.trim().is_empty() {
            return Err(TabError::new("last_name", "Informe o sobrenome"));
        }
        if !name_within_limit(&form.first_name, &form.last_name) {
            return Err(TabError::new(
                "last_name",
                "Nome e sobrenome devem ter no máximo 255 caracteres",
            ));
        }
        if form.cpf.trim().is_empty() {
            return Err(TabError::new("cpf", "Informe o CPF"));
        }
        if !is_valid_cpf(&form.cpf) {
            return Err(TabError::new("cpf", "CPF inválido"));
        }
        if form.email.trim().is_empty() {
            return Err(TabError::new("email", "Informe o e-mail"));
        }
        if !is_valid_email(form.email.trim()) {
            return Err(TabError::new("email", "E-mail inválido"));
        }
        if form.phone.trim().is_empty() {
            return Err(TabError::new("phone", "Informe o telefone"));
        }
        if !is_valid_phone(&form.phone) {
            return Err(TabError::new("phone", "Telefone deve ter 11 dígitos"));
        }
        if form.birth_date.trim().is_empty() {
            return Err(TabError::new("birth_date", "Informe a data de nascimento"));
        }
        match validate_birth_date(&form.birth_date, self.now) {
            Ok(()) => {},
            Err(BirthDateError::Underage) => {
                return Err(TabError::new(
                    "birth_date",
                    "É necessário ter pelo menos 18 anos",
                ));
            },
            Err(_) => {
                return Err(TabError::new("birth_date", "Data de nascimento inválida"));
            },
        }

        Ok(())
    }

    fn validate_address(&self) -> Result<(), TabError> {
        let form = self.form;

        let cep_digits = form.cep.chars().filter(char::is_ascii_digit).count();
        if cep_digits == 0 {
            return Err(TabError::new("cep", "Informe o CEP"));
        }
        if cep_digits != 8 {
            return Err(TabError::new("cep", "CEP inválido"));
        }
        if form.street.trim().is_empty() {
            return Err(TabError::new("street", "Informe a rua"));
        }
        if form.number.trim().is_empty() {
            return Err(TabError::new("number", "Informe o número"));
        }
        if form.district.trim().is_empty() {
            return Err(TabError::new("district", "Informe o bairro"));
        }
        if form.city.trim().is_empty() {
            return Err(TabError::new("city", "Informe a cidade"));
        }
        if form.state.trim().is_empty() {
            return Err(TabError::new("state", "Informe o estado"));
        }

        if let Some(lookup) = &self.state.lookup {
            let mismatches =
                check_consistency(lookup, &form.state, &form.city, &form.district);
            if let Some(mismatch) = mismatches.first() {
                return Err(TabError::new(mismatch.field.as_str(), mismatch.message.clone()));
            }
        }

        Ok(())
    }

    fn validate_basic_info(&self) -> Result<(), TabError> {
        let professional = self.professional;

        if professional.experience.is_none() {
            return Err(TabError::new("experience", "Selecione sua experiência"));
        }
        if !professional.specialties.values().any(|selected| *selected) {
            return Err(TabError::new(
                "specialties",
                "Selecione pelo menos uma especialidade",
            ));
        }
        for platform in SocialPlatform::all() {
            if let Some(link) = professional.social_links.get(&platform) {
                if link.chars().count() > MAX_SOCIAL_LINK_LENGTH {
                    return Err(TabError::new(
                        "social_links",
                        format!("Link de {} muito longo", platform.as_str()),
                    ));
                }
            }
        }
        if professional.services.is_empty() {
            return Err(TabError::new("services", "Selecione pelo menos um serviço"));
        }
        for (service, price) in &professional.services {
            let parsed: Option<f64> = price.trim().replace(',', ".").parse().ok();
            if !parsed.is_some_and(|p| p > 0.0) {
                return Err(TabError::new(
                    "services",
                    format!("Informe um preço válido para {service}"),
                ));
            }
        }

        Ok(())
    }

    fn validate_hours(&self) -> Result<(), TabError> {
        match self.schedule_outcome() {
            Ok(()) => Ok(()),
            Err(ScheduleError::Empty) => Err(TabError::new(
                "work_hours",
                "Configure pelo menos um dia de atendimento",
            )),
            Err(ScheduleError::Malformed { day, period, reason }) => Err(TabError::new(
                "work_hours",
                format!("Horário inválido em {} ({}): {}", day, period.as_str(), reason),
            )),
        }
    }

    fn validate_portfolio(&self) -> Result<(), TabError> {
        // Images are optional; any present image must be complete.
        for image in &self.professional.portfolio {
            if image.uri.trim().is_empty() || image.mime_type.trim().is_empty() {
                return Err(TabError::new("portfolio", "Imagem do portfólio inválida"));
            }
        }
        Ok(())
    }

    fn validate_security(&self) -> Result<(), TabError> {
        let form = self.form;

        let untouched = form.current_password.is_empty()
            && form.new_password.is_empty()
            && form.confirm_password.is_empty();

        match self.mode {
            WizardMode::EditProfile if untouched => return Ok(()),
            WizardMode::EditProfile => {
                if form.current_password.is_empty() {
                    return Err(TabError::new("current_password", "Informe a senha atual"));
                }
                if form.new_password.is_empty() {
                    return Err(TabError::new("new_password", "Informe a nova senha"));
                }
            },
            WizardMode::Registration => {
                if form.new_password.is_empty() {
                    return Err(TabError::new("new_password", "Informe uma senha"));
                }
            },
        }

        if !is_valid_password(&form.new_password) {
            return Err(TabError::new(
                "new_password",
                "A senha deve ter ao menos 8 caracteres, incluindo maiúscula, número e símbolo",
            ));
        }
        if form.confirm_password != form.new_password {
            return Err(TabError::new("confirm_password", "As senhas não coincidem"));
        }
        if self.mode == WizardMode::Registration && !form.terms_accepted {
            return Err(TabError::new(
                "terms_accepted",
                "É necessário aceitar os termos de uso",
            ));
        }

        Ok(())
    }
}
