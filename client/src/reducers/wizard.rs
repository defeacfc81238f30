//! Registration / edit-profile wizard reducer.
//!
//! Owns the tab navigation controller and the field-edit transitions:
//!
//! 1. Field edits are masked and stored; address edits re-run the
//!    consistency check against the last postal lookup
//! 2. Completing an 8-digit CEP triggers the lookup effect; success
//!    auto-fills street/district/city/state
//! 3. Tabs unlock strictly left-to-right from the validation gate;
//!    "Next" runs the active tab's imperative validator, "Back" never
//!    validates
//! 4. Submit re-runs the whole gate chain, then issues the backend call
//!
//! Leaving the hours tab distinguishes an empty schedule (notice) from a
//! malformed one (silent block); see `last_schedule_error` on state.

use crate::actions::{FormField, TimeBound, WizardAction};
use crate::address::check_consistency;
use crate::environment::ClientEnvironment;
use crate::error::{friendly_auth_message, ClientError};
use crate::format::{format_birth_date, format_cep, format_cpf, format_phone};
use crate::providers::{
    AccountsApi, AddressPayload, FileShare, PostalLookup, ProfessionalDirectory,
    ProfessionalPayload, RegistrationPayload,
};
use crate::state::{Notice, WizardMode, WizardState};
use crate::tabs::{next_tab, prev_tab, Tab, TabGate};
use crate::work_hours::{PeriodKind, ScheduleError};
use inkbook_core::effect::Effect;
use inkbook_core::reducer::Reducer;
use inkbook_core::{smallvec, SmallVec};

/// Strip a masked field down to its digits.
fn digits_of(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Build the backend payload from validated wizard state.
fn build_payload(state: &WizardState) -> RegistrationPayload {
    let form = &state.form;
    let professional = &state.professional;

    let password_changed = !form.new_password.is_empty();

    RegistrationPayload {
        role: state.role.as_str().to_string(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        cpf: digits_of(&form.cpf),
        email: form.email.trim().to_string(),
        phone: digits_of(&form.phone),
        birth_date: form.birth_date.clone(),
        address: AddressPayload {
            cep: digits_of(&form.cep),
            street: form.street.trim().to_string(),
            number: form.number.trim().to_string(),
            complement: form.complement.trim().to_string(),
            district: form.district.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_string(),
        },
        password: password_changed.then(|| form.new_password.clone()),
        current_password: (password_changed && state.mode == WizardMode::EditProfile)
            .then(|| form.current_password.clone()),
        professional: (state.role == crate::state::Role::Artist).then(|| {
            ProfessionalPayload {
                experience: professional
                    .experience
                    .map(|e| e.as_str().to_string())
                    .unwrap_or_default(),
                specialties: professional
                    .specialties
                    .iter()
                    .filter(|(_, selected)| **selected)
                    .map(|(name, _)| name.clone())
                    .collect(),
                social_links: professional
                    .social_links
                    .iter()
                    .filter(|(_, link)| !link.trim().is_empty())
                    .map(|(platform, link)| {
                        (platform.as_str().to_string(), link.trim().to_string())
                    })
                    .collect(),
                work_hours: professional.work_hours.clone(),
                portfolio: professional.portfolio.clone(),
                services: professional
                    .services
                    .iter()
                    .map(|(name, price)| {
                        let parsed =
                            price.trim().replace(',', ".").parse().unwrap_or(0.0);
                        (name.clone(), parsed)
                    })
                    .collect(),
            }
        }),
    }
}

/// Registration / edit-profile wizard reducer.
#[derive(Debug, Clone)]
pub struct WizardReducer<A, D, P, F> {
    _phantom: std::marker::PhantomData<(A, D, P, F)>,
}

impl<A, D, P, F> WizardReducer<A, D, P, F> {
    /// Create a new wizard reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, D, P, F> Default for WizardReducer<A, D, P, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, D, P, F> WizardReducer<A, D, P, F> {
    /// Recompute the reactive address mismatches.
    fn refresh_mismatches(state: &mut WizardState) {
        state.address_mismatches = match &state.lookup {
            Some(lookup) => check_consistency(
                lookup,
                &state.form.state,
                &state.form.city,
                &state.form.district,
            ),
            None => Vec::new(),
        };
    }

    /// Apply a failed backend call to state.
    fn apply_failure(state: &mut WizardState, error: &ClientError) {
        if error.forces_logout() {
            state.logged_out = true;
            state.notice = Some(Notice::error("Sessão expirada. Faça login novamente."));
            return;
        }

        let text = match error {
            ClientError::Network { message, .. } => friendly_auth_message(message)
                .map_or_else(
                    || "Não foi possível salvar. Tente novamente.".to_string(),
                    ToString::to_string,
                ),
            ClientError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        };
        state.notice = Some(Notice::error(text));
    }

    /// Advance past the active tab after its validator succeeded.
    fn advance(state: &mut WizardState) {
        if let Some(next) = next_tab(state.role, state.active_tab) {
            state.active_tab = next;
            state.notice = None;
        }
    }
}

impl<A, D, P, F> Reducer for WizardReducer<A, D, P, F>
where
    A: AccountsApi + Clone + 'static,
    D: ProfessionalDirectory + Clone + 'static,
    P: PostalLookup + Clone + 'static,
    F: FileShare + Clone + 'static,
{
    type State = WizardState;
    type Action = WizardAction;
    type Environment = ClientEnvironment<A, D, P, F>;

    #[allow(clippy::too_many_lines)] // one arm per action keeps the flow in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Field edits
            // ═══════════════════════════════════════════════════════════
            WizardAction::FieldChanged { field, value } => {
                let mut effects: SmallVec<[Effect<Self::Action>; 4]> = SmallVec::new();

                match field {
                    FormField::FirstName => state.form.first_name = value,
                    FormField::LastName => state.form.last_name = value,
                    FormField::Cpf => state.form.cpf = format_cpf(&value),
                    FormField::Email => state.form.email = value,
                    FormField::Phone => state.form.phone = format_phone(&value),
                    FormField::BirthDate => {
                        state.form.birth_date = format_birth_date(&value);
                    },
                    FormField::Cep => {
                        let masked = format_cep(&value);
                        let changed = masked != state.form.cep;
                        state.form.cep = masked;

                        let digits = digits_of(&state.form.cep);
                        if changed && digits.len() == 8 && !state.looking_up_cep {
                            state.looking_up_cep = true;
                            let postal = env.postal.clone();

                            effects.push(Effect::Future(Box::pin(async move {
                                match postal.lookup(&digits).await {
                                    Ok(address) => {
                                        Some(WizardAction::CepLookupSucceeded { address })
                                    },
                                    Err(error) => {
                                        Some(WizardAction::CepLookupFailed { error })
                                    },
                                }
                            })));
                        }
                    },
                    FormField::Street => state.form.street = value,
                    FormField::Number => state.form.number = value,
                    FormField::Complement => state.form.complement = value,
                    FormField::District => {
                        state.form.district = value;
                        Self::refresh_mismatches(state);
                    },
                    FormField::City => {
                        state.form.city = value;
                        Self::refresh_mismatches(state);
                    },
                    FormField::State => {
                        state.form.state = value;
                        Self::refresh_mismatches(state);
                    },
                    FormField::CurrentPassword => state.form.current_password = value,
                    FormField::NewPassword => state.form.new_password = value,
                    FormField::ConfirmPassword => state.form.confirm_password = value,
                }

                effects
            },

            WizardAction::TermsToggled { accepted } => {
                state.form.terms_accepted = accepted;
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Postal lookup
            // ═══════════════════════════════════════════════════════════
            WizardAction::CepLookupSucceeded { address } => {
                state.looking_up_cep = false;
                // Auto-fill, so the fields match by construction until the
                // user edits them.
                state.form.street.clone_from(&address.street);
                state.form.district.clone_from(&address.district);
                state.form.city.clone_from(&address.city);
                state.form.state.clone_from(&address.state);
                state.lookup = Some(address);
                Self::refresh_mismatches(state);
                SmallVec::new()
            },

            WizardAction::CepLookupFailed { error } => {
                state.looking_up_cep = false;
                state.lookup = None;
                Self::refresh_mismatches(state);

                state.notice = Some(match error {
                    ClientError::CepNotFound => Notice::warning("CEP não encontrado"),
                    _ => Notice::error("Não foi possível consultar o CEP"),
                });
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Navigation
            // ═══════════════════════════════════════════════════════════
            WizardAction::TabPressed { tab } => {
                let (unlocked, first_unmet) = {
                    let gate = TabGate::new(state, env.clock.now());
                    (gate.available_tabs().contains(&tab), gate.first_unmet(tab))
                };

                if unlocked {
                    state.active_tab = tab;
                } else if let Some(unmet) = first_unmet {
                    state.notice = Some(Notice::warning(format!(
                        "Complete a aba {} antes de continuar",
                        unmet.label()
                    )));
                }
                SmallVec::new()
            },

            WizardAction::NextPressed => {
                if state.active_tab == Tab::Hours {
                    let outcome =
                        TabGate::new(state, env.clock.now()).schedule_outcome();
                    match outcome {
                        Ok(()) => {
                            state.last_schedule_error = None;
                            Self::advance(state);
                        },
                        Err(ScheduleError::Empty) => {
                            state.last_schedule_error = Some(ScheduleError::Empty);
                            state.notice = Some(Notice::error(
                                "Configure pelo menos um dia de atendimento",
                            ));
                        },
                        Err(error) => {
                            // Malformed-but-present schedule blocks without a
                            // notice; the source behavior is preserved.
                            state.last_schedule_error = Some(error);
                        },
                    }
                    return SmallVec::new();
                }

                let result =
                    TabGate::new(state, env.clock.now()).validate(state.active_tab);
                match result {
                    Ok(()) => Self::advance(state),
                    Err(error) => {
                        state.notice = Some(Notice::error(error.message));
                    },
                }
                SmallVec::new()
            },

            WizardAction::PrevPressed => {
                // Going backward never validates.
                if let Some(prev) = prev_tab(state.role, state.active_tab) {
                    state.active_tab = prev;
                }
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Hydration (edit mode)
            // ═══════════════════════════════════════════════════════════
            WizardAction::LoadRequested => {
                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.fetch_profile().await {
                        Ok(profile) => Some(WizardAction::ProfileLoaded {
                            form: profile.form,
                            professional: profile.professional,
                        }),
                        Err(error) => Some(WizardAction::LoadFailed { error }),
                    }
                }))]
            },

            WizardAction::ProfileLoaded { form, professional } => {
                state.form = form;
                state.professional = professional;
                state.lookup = None;
                Self::refresh_mismatches(state);
                SmallVec::new()
            },

            WizardAction::LoadFailed { error } => {
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Submission
            // ═══════════════════════════════════════════════════════════
            WizardAction::SubmitPressed => {
                if state.submitting {
                    return SmallVec::new();
                }

                let outcome = TabGate::new(state, env.clock.now()).validate_all();
                if let Err((tab, error)) = outcome {
                    state.active_tab = tab;
                    if tab == Tab::Hours {
                        let schedule = TabGate::new(state, env.clock.now())
                            .schedule_outcome()
                            .err();
                        let silent =
                            !matches!(schedule, Some(ScheduleError::Empty) | None);
                        state.last_schedule_error = schedule;
                        if silent {
                            return SmallVec::new();
                        }
                    }
                    state.notice = Some(Notice::error(error.message));
                    return SmallVec::new();
                }

                state.submitting = true;
                state.notice = None;

                let payload = build_payload(state);
                let api = env.api.clone();
                let mode = state.mode;

                smallvec![Effect::Future(Box::pin(async move {
                    let result = match mode {
                        WizardMode::Registration => api.register(&payload).await,
                        WizardMode::EditProfile => api.update_profile(&payload).await,
                    };
                    match result {
                        Ok(()) => Some(WizardAction::SubmitSucceeded),
                        Err(error) => Some(WizardAction::SubmitFailed { error }),
                    }
                }))]
            },

            WizardAction::SubmitSucceeded => {
                state.submitting = false;
                state.submitted = true;
                state.notice = Some(Notice::success(match state.mode {
                    WizardMode::Registration => "Cadastro realizado com sucesso",
                    WizardMode::EditProfile => "Perfil atualizado com sucesso",
                }));
                SmallVec::new()
            },

            WizardAction::SubmitFailed { error } => {
                state.submitting = false;
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Artist form edits
            // ═══════════════════════════════════════════════════════════
            WizardAction::ExperienceSelected { bracket } => {
                state.professional.experience = Some(bracket);
                SmallVec::new()
            },

            WizardAction::SpecialtyToggled { name, selected } => {
                state.professional.specialties.insert(name, selected);
                SmallVec::new()
            },

            WizardAction::SocialLinkChanged { platform, value } => {
                state.professional.social_links.insert(platform, value);
                SmallVec::new()
            },

            WizardAction::DayAvailabilityToggled { day_index } => {
                if let Some(day) = state.professional.work_hours.days.get_mut(day_index)
                {
                    day.available = !day.available;
                    if !day.available {
                        // Unavailable day may not keep enabled windows.
                        day.morning.enabled = false;
                        day.afternoon.enabled = false;
                    }
                }
                SmallVec::new()
            },

            WizardAction::PeriodToggled { day_index, period } => {
                if let Some(day) = state.professional.work_hours.days.get_mut(day_index)
                {
                    if day.available {
                        let window = match period {
                            PeriodKind::Morning => &mut day.morning,
                            PeriodKind::Afternoon => &mut day.afternoon,
                        };
                        window.enabled = !window.enabled;
                    }
                }
                SmallVec::new()
            },

            WizardAction::PeriodTimeChanged {
                day_index,
                period,
                bound,
                value,
            } => {
                if let Some(day) = state.professional.work_hours.days.get_mut(day_index)
                {
                    let window = match period {
                        PeriodKind::Morning => &mut day.morning,
                        PeriodKind::Afternoon => &mut day.afternoon,
                    };
                    match bound {
                        TimeBound::Start => window.start = value,
                        TimeBound::End => window.end = value,
                    }
                }
                SmallVec::new()
            },

            WizardAction::PortfolioImageAdded { image } => {
                state.professional.portfolio.push(image);
                SmallVec::new()
            },

            WizardAction::PortfolioImageRemoved { index } => {
                if index < state.professional.portfolio.len() {
                    state.professional.portfolio.remove(index);
                }
                SmallVec::new()
            },

            WizardAction::ServiceSelected { name } => {
                state.professional.services.entry(name).or_default();
                SmallVec::new()
            },

            WizardAction::ServiceRemoved { name } => {
                state.professional.services.remove(&name);
                SmallVec::new()
            },

            WizardAction::ServicePriceChanged { name, price } => {
                state.professional.services.insert(name, price);
                SmallVec::new()
            },

            WizardAction::NoticeDismissed => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::PostalAddress;
    use crate::config::ClientConfig;
    use crate::mocks::{MockAccountsApi, MockDirectory, MockFileShare, MockPostalLookup};
    use crate::state::{NoticeLevel, Role};
    use inkbook_testing::{assertions, FixedClock, ReducerTest};
    use std::sync::Arc;

    type TestReducer =
        WizardReducer<MockAccountsApi, MockDirectory, MockPostalLookup, MockFileShare>;
    type TestEnv = ClientEnvironment<
        MockAccountsApi,
        MockDirectory,
        MockPostalLookup,
        MockFileShare,
    >;

    fn clock() -> FixedClock {
        inkbook_testing::test_clock()
    }

    fn test_env() -> TestEnv {
        ClientEnvironment::new(
            MockAccountsApi::new(),
            MockDirectory::new(),
            MockPostalLookup::new(),
            MockFileShare::new(),
            Arc::new(clock()),
            ClientConfig::default(),
        )
    }

    fn valid_client_state() -> WizardState {
        let mut state = WizardState::registration(Role::Client);
        state.form.first_name = "Ana".into();
        state.form.last_name = "Silva".into();
        state.form.cpf = "529.982.247-25".into();
        state.form.email = "ana@example.com".into();
        state.form.phone = "(11) 98765-4321".into();
        state.form.birth_date = "15/06/1990".into();
        state.form.cep = "01310-100".into();
        state.form.street = "Avenida Paulista".into();
        state.form.number = "1000".into();
        state.form.district = "Bela Vista".into();
        state.form.city = "São Paulo".into();
        state.form.state = "SP".into();
        state.form.new_password = "Abcdefg1!".into();
        state.form.confirm_password = "Abcdefg1!".into();
        state.form.terms_accepted = true;
        state
    }

    #[test]
    fn test_field_edit_applies_mask() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::FieldChanged {
                field: FormField::Cpf,
                value: "52998224725".into(),
            })
            .then_state(|state| {
                assert_eq!(state.form.cpf, "529.982.247-25");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_completing_cep_triggers_lookup() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::FieldChanged {
                field: FormField::Cep,
                value: "01310100".into(),
            })
            .then_state(|state| {
                assert_eq!(state.form.cep, "01310-100");
                assert!(state.looking_up_cep);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_partial_cep_does_not_trigger_lookup() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::FieldChanged {
                field: FormField::Cep,
                value: "0131".into(),
            })
            .then_state(|state| {
                assert!(!state.looking_up_cep);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_lookup_success_autofills_address() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::CepLookupSucceeded {
                address: PostalAddress {
                    street: "Avenida Paulista".into(),
                    district: "Bela Vista".into(),
                    city: "São Paulo".into(),
                    state: "SP".into(),
                },
            })
            .then_state(|state| {
                assert_eq!(state.form.city, "São Paulo");
                assert_eq!(state.form.state, "SP");
                assert!(state.address_mismatches.is_empty());
            })
            .run();
    }

    #[test]
    fn test_editing_state_after_lookup_flags_mismatch() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::CepLookupSucceeded {
                address: PostalAddress {
                    street: "Avenida Paulista".into(),
                    district: "Centro".into(),
                    city: "São Paulo".into(),
                    state: "SP".into(),
                },
            })
            .when_action(WizardAction::FieldChanged {
                field: FormField::State,
                value: "RJ".into(),
            })
            .then_state(|state| {
                assert_eq!(state.address_mismatches.len(), 1);
                assert_eq!(
                    state.address_mismatches[0].message,
                    "Estado deve ser SP para este CEP"
                );
            })
            .run();
    }

    #[test]
    fn test_locked_tab_press_warns_with_prerequisite() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::TabPressed { tab: Tab::Security })
            .then_state(|state| {
                assert_eq!(state.active_tab, Tab::Personal);
                let notice = state.notice.as_ref().unwrap();
                assert_eq!(notice.level, NoticeLevel::Warning);
                assert!(notice.text.contains("Dados pessoais"));
            })
            .run();
    }

    #[test]
    fn test_next_surfaces_first_failing_field() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Client))
            .when_action(WizardAction::NextPressed)
            .then_state(|state| {
                assert_eq!(state.active_tab, Tab::Personal);
                assert_eq!(state.notice.as_ref().unwrap().text, "Informe o nome");
            })
            .run();
    }

    #[test]
    fn test_next_advances_valid_tab() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(valid_client_state())
            .when_action(WizardAction::NextPressed)
            .then_state(|state| {
                assert_eq!(state.active_tab, Tab::Address);
            })
            .run();
    }

    #[test]
    fn test_prev_never_validates() {
        let mut state = WizardState::registration(Role::Client);
        state.active_tab = Tab::Address;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(WizardAction::PrevPressed)
            .then_state(|state| {
                assert_eq!(state.active_tab, Tab::Personal);
                assert!(state.notice.is_none());
            })
            .run();
    }

    #[test]
    fn test_empty_schedule_raises_notice() {
        let mut state = WizardState::registration(Role::Artist);
        state.active_tab = Tab::Hours;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(WizardAction::NextPressed)
            .then_state(|state| {
                assert_eq!(state.active_tab, Tab::Hours);
                assert_eq!(
                    state.notice.as_ref().unwrap().text,
                    "Configure pelo menos um dia de atendimento"
                );
                assert_eq!(state.last_schedule_error, Some(ScheduleError::Empty));
            })
            .run();
    }

    #[test]
    fn test_malformed_schedule_blocks_silently() {
        let mut state = WizardState::registration(Role::Artist);
        state.active_tab = Tab::Hours;
        let day = &mut state.professional.work_hours.days[0];
        day.available = true;
        day.morning.enabled = true;
        day.morning.start = "09:00".into();
        day.morning.end = "08:00".into();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(WizardAction::NextPressed)
            .then_state(|state| {
                assert_eq!(state.active_tab, Tab::Hours);
                assert!(state.notice.is_none(), "malformed schedule blocks silently");
                assert!(matches!(
                    state.last_schedule_error,
                    Some(ScheduleError::Malformed { .. })
                ));
            })
            .run();
    }

    #[test]
    fn test_submit_emits_backend_effect() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(valid_client_state())
            .when_action(WizardAction::SubmitPressed)
            .then_state(|state| {
                assert!(state.submitting);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_submit_jumps_to_first_invalid_tab() {
        let mut state = valid_client_state();
        state.form.email = "broken".into();
        state.active_tab = Tab::Security;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(WizardAction::SubmitPressed)
            .then_state(|state| {
                assert!(!state.submitting);
                assert_eq!(state.active_tab, Tab::Personal);
                assert_eq!(state.notice.as_ref().unwrap().text, "E-mail inválido");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_session_expiry_forces_logout() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(valid_client_state())
            .when_action(WizardAction::SubmitFailed {
                error: ClientError::SessionExpired,
            })
            .then_state(|state| {
                assert!(state.logged_out);
            })
            .run();
    }

    #[test]
    fn test_disabling_day_disables_windows() {
        let mut state = WizardState::registration(Role::Artist);
        let day = &mut state.professional.work_hours.days[2];
        day.available = true;
        day.morning.enabled = true;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(WizardAction::DayAvailabilityToggled { day_index: 2 })
            .then_state(|state| {
                let day = &state.professional.work_hours.days[2];
                assert!(!day.available);
                assert!(!day.morning.enabled);
                assert!(!day.afternoon.enabled);
            })
            .run();
    }

    #[test]
    fn test_period_toggle_ignored_on_unavailable_day() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(WizardState::registration(Role::Artist))
            .when_action(WizardAction::PeriodToggled {
                day_index: 0,
                period: PeriodKind::Morning,
            })
            .then_state(|state| {
                assert!(!state.professional.work_hours.days[0].morning.enabled);
            })
            .run();
    }

    #[test]
    fn test_payload_normalizes_masked_fields() {
        let payload = build_payload(&valid_client_state());
        assert_eq!(payload.cpf, "52998224725");
        assert_eq!(payload.phone, "11987654321");
        assert_eq!(payload.address.cep, "01310100");
        assert_eq!(payload.password.as_deref(), Some("Abcdefg1!"));
        assert!(payload.professional.is_none());
    }
}
