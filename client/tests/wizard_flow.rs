//! Wizard integration tests: postal auto-fill and submission observed
//! through a real store.

use inkbook_client::actions::FormField;
use inkbook_client::address::PostalAddress;
use inkbook_client::config::ClientConfig;
use inkbook_client::environment::ClientEnvironment;
use inkbook_client::mocks::{
    MockAccountsApi, MockDirectory, MockFileShare, MockPostalLookup,
};
use inkbook_client::reducers::WizardReducer;
use inkbook_client::{ClientError, Role, Tab, WizardAction, WizardState};
use inkbook_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

type TestEnv =
    ClientEnvironment<MockAccountsApi, MockDirectory, MockPostalLookup, MockFileShare>;
type TestReducer =
    WizardReducer<MockAccountsApi, MockDirectory, MockPostalLookup, MockFileShare>;
type WizardStore = Store<WizardState, WizardAction, TestEnv, TestReducer>;

fn store_with(api: MockAccountsApi, postal: MockPostalLookup, state: WizardState) -> WizardStore {
    let env = ClientEnvironment::new(
        api,
        MockDirectory::new(),
        postal,
        MockFileShare::new(),
        Arc::new(inkbook_testing::test_clock()),
        ClientConfig::default(),
    );

    Store::new(state, TestReducer::new(), env)
}

fn paulista() -> PostalAddress {
    PostalAddress {
        street: "Avenida Paulista".into(),
        district: "Bela Vista".into(),
        city: "São Paulo".into(),
        state: "SP".into(),
    }
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

#[tokio::test]
async fn completing_cep_autofills_address_through_the_store() {
    let postal = MockPostalLookup::new().with_address("01310100", paulista());
    let store = store_with(
        MockAccountsApi::new(),
        postal.clone(),
        WizardState::registration(Role::Client),
    );

    let result = store
        .send_and_wait_for(
            WizardAction::FieldChanged {
                field: FormField::Cep,
                value: "01310100".into(),
            },
            |a| matches!(a, WizardAction::CepLookupSucceeded { .. }),
            Duration::from_secs(2),
        )
        .await;
    assert!(result.is_ok());

    let state = store.state(Clone::clone).await;
    assert_eq!(state.form.street, "Avenida Paulista");
    assert_eq!(state.form.city, "São Paulo");
    assert_eq!(state.form.state, "SP");
    assert!(!state.looking_up_cep);
    assert_eq!(postal.calls(), 1);
}

#[tokio::test]
async fn unknown_cep_raises_a_warning() {
    let store = store_with(
        MockAccountsApi::new(),
        MockPostalLookup::new(),
        WizardState::registration(Role::Client),
    );

    store
        .send_and_wait_for(
            WizardAction::FieldChanged {
                field: FormField::Cep,
                value: "99999999".into(),
            },
            |a| matches!(a, WizardAction::CepLookupFailed { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.notice.as_ref().unwrap().text, "CEP não encontrado");
    assert!(state.lookup.is_none());
}

#[tokio::test]
async fn submit_sends_normalized_payload_and_completes() {
    let api = MockAccountsApi::new();
    let store = store_with(api.clone(), MockPostalLookup::new(), valid_client_state());

    let result = store
        .send_and_wait_for(
            WizardAction::SubmitPressed,
            |a| {
                matches!(
                    a,
                    WizardAction::SubmitSucceeded | WizardAction::SubmitFailed { .. }
                )
            },
            Duration::from_secs(2),
        )
        .await
        .unwrap();
    assert_eq!(result, WizardAction::SubmitSucceeded);

    let state = store.state(Clone::clone).await;
    assert!(state.submitted);
    assert!(!state.submitting);

    assert_eq!(api.register_calls(), 1);
    let payload = api.last_payload().unwrap();
    assert_eq!(payload.cpf, "52998224725");
    assert_eq!(payload.phone, "11987654321");
    assert_eq!(payload.address.cep, "01310100");
    assert_eq!(payload.role, "client");
}

#[tokio::test]
async fn duplicate_registration_shows_friendly_message() {
    let api = MockAccountsApi::new().failing(ClientError::Network {
        status: Some(409),
        message: "email already registered".into(),
    });
    let store = store_with(api, MockPostalLookup::new(), valid_client_state());

    store
        .send_and_wait_for(
            WizardAction::SubmitPressed,
            |a| matches!(a, WizardAction::SubmitFailed { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(!state.submitted);
    assert_eq!(
        state.notice.as_ref().unwrap().text,
        "E-mail ou CPF já cadastrado."
    );
}

#[tokio::test]
async fn expired_session_on_update_forces_logout() {
    let api = MockAccountsApi::new().failing(ClientError::SessionExpired);
    let mut state = valid_client_state();
    state.mode = inkbook_client::WizardMode::EditProfile;
    state.form.current_password = "Abcdefg1!".into();
    let store = store_with(api, MockPostalLookup::new(), state);

    store
        .send_and_wait_for(
            WizardAction::SubmitPressed,
            |a| matches!(a, WizardAction::SubmitFailed { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.logged_out);
}

#[tokio::test]
async fn hydration_fills_the_form_for_edit_mode() {
    let profile = inkbook_client::providers::StoredProfile {
        form: valid_client_state().form,
        professional: Default::default(),
    };
    let api = MockAccountsApi::new().with_profile(profile);
    let store = store_with(
        api,
        MockPostalLookup::new(),
        WizardState::edit_profile(Role::Client),
    );

    store
        .send_and_wait_for(
            WizardAction::LoadRequested,
            |a| matches!(a, WizardAction::ProfileLoaded { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.form.first_name, "Ana");
    assert_eq!(state.form.cpf, "529.982.247-25");
    assert_eq!(state.active_tab, Tab::Personal);
}
