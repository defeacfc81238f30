//! Account-flow integration tests: two-factor setup, the recovery-email
//! deadline race, and history export observed through a real store.

use inkbook_client::config::ClientConfig;
use inkbook_client::environment::ClientEnvironment;
use inkbook_client::mocks::{
    MockAccountsApi, MockDirectory, MockFileShare, MockPostalLookup,
};
use inkbook_client::providers::ExportDocument;
use inkbook_client::reducers::AccountReducer;
use inkbook_client::state::{ExportPhase, EmailPhase, TwoFactorPhase};
use inkbook_client::{AccountAction, AccountState};
use inkbook_runtime::Store;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

type TestEnv =
    ClientEnvironment<MockAccountsApi, MockDirectory, MockPostalLookup, MockFileShare>;
type TestReducer =
    AccountReducer<MockAccountsApi, MockDirectory, MockPostalLookup, MockFileShare>;
type AccountStore = Store<AccountState, AccountAction, TestEnv, TestReducer>;

fn store_with(api: MockAccountsApi, files: MockFileShare, config: ClientConfig) -> AccountStore {
    let env = ClientEnvironment::new(
        api,
        MockDirectory::new(),
        MockPostalLookup::new(),
        files,
        Arc::new(inkbook_testing::test_clock()),
        config,
    );

    Store::new(AccountState::default(), TestReducer::new(), env)
}

#[tokio::test]
async fn two_factor_setup_happy_path() {
    let store = store_with(
        MockAccountsApi::new(),
        MockFileShare::new(),
        ClientConfig::default(),
    );

    store
        .send_and_wait_for(
            AccountAction::TwoFactorSetupRequested,
            |a| matches!(a, AccountAction::TwoFactorSecretIssued { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert!(matches!(
        store.state(|s| s.two_factor.clone()).await,
        TwoFactorPhase::AwaitingCode { .. }
    ));

    let result = store
        .send_and_wait_for(
            AccountAction::TwoFactorCodeSubmitted {
                code: "123456".into(),
            },
            |a| {
                matches!(
                    a,
                    AccountAction::TwoFactorConfirmed
                        | AccountAction::TwoFactorRejected { .. }
                )
            },
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(result, AccountAction::TwoFactorConfirmed);
    assert_eq!(
        store.state(|s| s.two_factor.clone()).await,
        TwoFactorPhase::Enabled
    );
}

#[tokio::test]
async fn wrong_code_is_recoverable_and_retry_succeeds() {
    let store = store_with(
        MockAccountsApi::new(),
        MockFileShare::new(),
        ClientConfig::default(),
    );

    store
        .send_and_wait_for(
            AccountAction::TwoFactorSetupRequested,
            |a| matches!(a, AccountAction::TwoFactorSecretIssued { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    // Wrong code: rejected but still awaiting.
    store
        .send_and_wait_for(
            AccountAction::TwoFactorCodeSubmitted {
                code: "000000".into(),
            },
            |a| matches!(a, AccountAction::TwoFactorRejected { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert!(matches!(
        store.state(|s| s.two_factor.clone()).await,
        TwoFactorPhase::AwaitingCode { .. }
    ));

    // Retry with the right code.
    store
        .send_and_wait_for(
            AccountAction::TwoFactorCodeSubmitted {
                code: "123456".into(),
            },
            |a| matches!(a, AccountAction::TwoFactorConfirmed),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(
        store.state(|s| s.two_factor.clone()).await,
        TwoFactorPhase::Enabled
    );
}

#[tokio::test]
async fn slow_recovery_email_yields_timeout_and_late_result_is_discarded() {
    // Deadline far shorter than the provider latency.
    let api = MockAccountsApi::new().with_email_latency(Duration::from_millis(300));
    let config = ClientConfig::default()
        .with_recovery_email_timeout(Duration::from_millis(50));
    let store = store_with(api.clone(), MockFileShare::new(), config);

    let result = store
        .send_and_wait_for(
            AccountAction::RecoveryCodeRequested,
            |a| {
                matches!(
                    a,
                    AccountAction::RecoveryCodeSent
                        | AccountAction::RecoveryEmailTimedOut
                        | AccountAction::RecoveryEmailFailed { .. }
                )
            },
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(result, AccountAction::RecoveryEmailTimedOut);
    assert_eq!(api.recovery_send_calls(), 1);

    let state = store.state(Clone::clone).await;
    assert_eq!(state.recovery, EmailPhase::Idle);
    assert!(state.notice.as_ref().unwrap().text.contains("demorou demais"));

    // The abandoned request finishes later; its result must change nothing.
    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = store.state(Clone::clone).await;
    assert_eq!(state.recovery, EmailPhase::Idle);
}

#[tokio::test]
async fn recovery_code_path_confirms() {
    let store = store_with(
        MockAccountsApi::new(),
        MockFileShare::new(),
        ClientConfig::default(),
    );

    store
        .send_and_wait_for(
            AccountAction::RecoveryCodeRequested,
            |a| matches!(a, AccountAction::RecoveryCodeSent),
            Duration::from_secs(2),
        )
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.recovery).await, EmailPhase::Sent);

    store
        .send_and_wait_for(
            AccountAction::RecoveryCodeSubmitted {
                code: "123456".into(),
            },
            |a| matches!(a, AccountAction::RecoveryConfirmed),
            Duration::from_secs(2),
        )
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.recovery).await, EmailPhase::Idle);
}

#[tokio::test]
async fn export_decodes_and_hands_document_to_share_surface() {
    // "JVBERi0xLjQ=" is base64 for "%PDF-1.4".
    let api = MockAccountsApi::new().with_export_document(ExportDocument {
        file_name: "historico.pdf".into(),
        base64: "JVBERi0xLjQ=".into(),
    });
    let files = MockFileShare::new();
    let store = store_with(api, files.clone(), ClientConfig::default());

    let result = store
        .send_and_wait_for(
            AccountAction::ExportRequested {
                from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                to: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            |a| {
                matches!(
                    a,
                    AccountAction::ExportShared | AccountAction::ExportFailed { .. }
                )
            },
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(result, AccountAction::ExportShared);
    assert_eq!(store.state(|s| s.export).await, ExportPhase::Idle);

    let shared = files.shared();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].0, "historico.pdf");
    assert_eq!(shared[0].1, b"%PDF-1.4");
}

#[tokio::test]
async fn export_with_no_completed_appointments_is_not_found() {
    let store = store_with(
        MockAccountsApi::new(),
        MockFileShare::new(),
        ClientConfig::default(),
    );

    store
        .send_and_wait_for(
            AccountAction::ExportRequested {
                from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                to: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            |a| matches!(a, AccountAction::ExportFailed { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.export, ExportPhase::Idle);
    assert_eq!(
        state.notice.as_ref().unwrap().text,
        "Nenhum atendimento concluído no período selecionado."
    );
}
