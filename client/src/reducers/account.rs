//! Account settings reducer: two-factor setup, recovery codes, and
//! appointment-history export.
//!
//! Every verification failure here is recoverable: the user retries the
//! code or falls back to the email recovery path. The email operations
//! race a fixed deadline; a timer win is its own outcome, distinct from a
//! network error, and the losing request is abandoned on its own task
//! rather than aborted.

use crate::actions::AccountAction;
use crate::environment::ClientEnvironment;
use crate::error::ClientError;
use crate::providers::{
    AccountsApi, FileShare, PostalLookup, ProfessionalDirectory,
};
use crate::state::{AccountState, ExportPhase, Notice, EmailPhase, TwoFactorPhase};
use base64::Engine;
use inkbook_core::effect::Effect;
use inkbook_core::reducer::Reducer;
use inkbook_core::{smallvec, SmallVec};

/// Account settings reducer.
#[derive(Debug, Clone)]
pub struct AccountReducer<A, D, P, F> {
    _phantom: std::marker::PhantomData<(A, D, P, F)>,
}

impl<A, D, P, F> AccountReducer<A, D, P, F> {
    /// Create a new account reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, D, P, F> Default for AccountReducer<A, D, P, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, D, P, F> AccountReducer<A, D, P, F> {
    /// Apply a failed backend call to state.
    fn apply_failure(state: &mut AccountState, error: &ClientError) {
        if error.forces_logout() {
            state.logged_out = true;
            state.notice = Some(Notice::error("Sessão expirada. Faça login novamente."));
            return;
        }

        let text = match error {
            ClientError::Validation { message, .. } => message.clone(),
            ClientError::NotFound { .. } => {
                "Nenhum atendimento concluído no período selecionado.".to_string()
            },
            _ => "Não foi possível concluir a operação. Tente novamente.".to_string(),
        };
        state.notice = Some(Notice::error(text));
    }
}

impl<A, D, P, F> Reducer for AccountReducer<A, D, P, F>
where
    A: AccountsApi + Clone + 'static,
    D: ProfessionalDirectory + Clone + 'static,
    P: PostalLookup + Clone + 'static,
    F: FileShare + Clone + 'static,
{
    type State = AccountState;
    type Action = AccountAction;
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
            // Two-factor setup
            // ═══════════════════════════════════════════════════════════
            AccountAction::TwoFactorSetupRequested => {
                if state.two_factor == TwoFactorPhase::PendingSecret {
                    return SmallVec::new();
                }
                state.two_factor = TwoFactorPhase::PendingSecret;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.request_two_factor_secret().await {
                        Ok(secret) => Some(AccountAction::TwoFactorSecretIssued {
                            secret: secret.secret,
                            otpauth_url: secret.otpauth_url,
                        }),
                        Err(error) => {
                            Some(AccountAction::TwoFactorSetupFailed { error })
                        },
                    }
                }))]
            },

            AccountAction::TwoFactorSecretIssued { secret, otpauth_url } => {
                state.two_factor = TwoFactorPhase::AwaitingCode { secret, otpauth_url };
                SmallVec::new()
            },

            AccountAction::TwoFactorSetupFailed { error } => {
                state.two_factor = TwoFactorPhase::Disabled;
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            AccountAction::TwoFactorCodeSubmitted { code } => {
                if !matches!(state.two_factor, TwoFactorPhase::AwaitingCode { .. }) {
                    return SmallVec::new();
                }

                let digits = code.chars().filter(char::is_ascii_digit).count();
                if digits != 6 || code.len() != 6 {
                    state.notice = Some(Notice::error("O código deve ter 6 dígitos"));
                    return SmallVec::new();
                }

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.confirm_two_factor(&code).await {
                        Ok(()) => Some(AccountAction::TwoFactorConfirmed),
                        Err(error) => Some(AccountAction::TwoFactorRejected { error }),
                    }
                }))]
            },

            AccountAction::TwoFactorConfirmed => {
                state.two_factor = TwoFactorPhase::Enabled;
                state.notice =
                    Some(Notice::success("Verificação em duas etapas ativada"));
                SmallVec::new()
            },

            AccountAction::TwoFactorRejected { error } => {
                // Recoverable: the user retries or falls back to a recovery
                // code. The AwaitingCode state is kept.
                if error.forces_logout() {
                    Self::apply_failure(state, &error);
                } else {
                    state.notice = Some(Notice::error(
                        "Código inválido. Tente novamente ou use um código de recuperação.",
                    ));
                }
                SmallVec::new()
            },

            AccountAction::TwoFactorDisableRequested => {
                if state.two_factor != TwoFactorPhase::Enabled {
                    return SmallVec::new();
                }

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.disable_two_factor().await {
                        Ok(()) => Some(AccountAction::TwoFactorDisabled),
                        Err(error) => {
                            Some(AccountAction::TwoFactorDisableFailed { error })
                        },
                    }
                }))]
            },

            AccountAction::TwoFactorDisabled => {
                state.two_factor = TwoFactorPhase::Disabled;
                state.notice =
                    Some(Notice::success("Verificação em duas etapas desativada"));
                SmallVec::new()
            },

            AccountAction::TwoFactorDisableFailed { error } => {
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Recovery code fallback (deadline-raced email operation)
            // ═══════════════════════════════════════════════════════════
            AccountAction::RecoveryCodeRequested => {
                if state.recovery == EmailPhase::Sending {
                    return SmallVec::new();
                }
                state.recovery = EmailPhase::Sending;

                let api = env.api.clone();
                let deadline = env.config.recovery_email_timeout;

                smallvec![Effect::Future(Box::pin(async move {
                    // The call runs on its own task: a deadline win leaves
                    // it running and discards whatever it later returns.
                    let call = tokio::spawn(async move { api.send_recovery_code().await });

                    match tokio::time::timeout(deadline, call).await {
                        Err(_elapsed) => Some(AccountAction::RecoveryEmailTimedOut),
                        Ok(Ok(Ok(()))) => Some(AccountAction::RecoveryCodeSent),
                        Ok(Ok(Err(error))) => {
                            Some(AccountAction::RecoveryEmailFailed { error })
                        },
                        Ok(Err(join_error)) => Some(AccountAction::RecoveryEmailFailed {
                            error: ClientError::Network {
                                status: None,
                                message: join_error.to_string(),
                            },
                        }),
                    }
                }))]
            },

            AccountAction::RecoveryCodeSent => {
                state.recovery = EmailPhase::Sent;
                state.notice = Some(Notice::success(
                    "Código de recuperação enviado para seu e-mail",
                ));
                SmallVec::new()
            },

            AccountAction::RecoveryEmailTimedOut => {
                state.recovery = EmailPhase::Idle;
                state.notice = Some(Notice::error(
                    "O envio do código demorou demais. Verifique sua conexão e tente novamente.",
                ));
                SmallVec::new()
            },

            AccountAction::RecoveryEmailFailed { error } => {
                state.recovery = EmailPhase::Idle;
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            AccountAction::RecoveryCodeSubmitted { code } => {
                if state.recovery != EmailPhase::Sent {
                    return SmallVec::new();
                }

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.verify_recovery_code(&code).await {
                        Ok(()) => Some(AccountAction::RecoveryConfirmed),
                        Err(error) => Some(AccountAction::RecoveryRejected { error }),
                    }
                }))]
            },

            AccountAction::RecoveryConfirmed => {
                state.recovery = EmailPhase::Idle;
                state.notice = Some(Notice::success("Código de recuperação aceito"));
                SmallVec::new()
            },

            AccountAction::VerificationEmailRequested => {
                if state.verification == EmailPhase::Sending {
                    return SmallVec::new();
                }
                state.verification = EmailPhase::Sending;

                let api = env.api.clone();
                let deadline = env.config.verification_email_timeout;

                smallvec![Effect::Future(Box::pin(async move {
                    let call =
                        tokio::spawn(async move { api.send_verification_email().await });

                    match tokio::time::timeout(deadline, call).await {
                        Err(_elapsed) => Some(AccountAction::VerificationEmailTimedOut),
                        Ok(Ok(Ok(()))) => Some(AccountAction::VerificationEmailSent),
                        Ok(Ok(Err(error))) => {
                            Some(AccountAction::VerificationEmailFailed { error })
                        },
                        Ok(Err(join_error)) => {
                            Some(AccountAction::VerificationEmailFailed {
                                error: ClientError::Network {
                                    status: None,
                                    message: join_error.to_string(),
                                },
                            })
                        },
                    }
                }))]
            },

            AccountAction::VerificationEmailSent => {
                state.verification = EmailPhase::Sent;
                state.notice =
                    Some(Notice::success("E-mail de verificação reenviado"));
                SmallVec::new()
            },

            AccountAction::VerificationEmailTimedOut => {
                state.verification = EmailPhase::Idle;
                state.notice = Some(Notice::error(
                    "O reenvio do e-mail demorou demais. Verifique sua conexão e tente novamente.",
                ));
                SmallVec::new()
            },

            AccountAction::VerificationEmailFailed { error } => {
                state.verification = EmailPhase::Idle;
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            AccountAction::RecoveryRejected { error } => {
                // Recoverable: Sent is kept so the user can retry.
                if error.forces_logout() {
                    Self::apply_failure(state, &error);
                } else {
                    state.notice = Some(Notice::error(
                        "Código de recuperação inválido. Tente novamente.",
                    ));
                }
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Appointment-history export
            // ═══════════════════════════════════════════════════════════
            AccountAction::ExportRequested { from, to } => {
                if state.export != ExportPhase::Idle {
                    return SmallVec::new();
                }
                state.export = ExportPhase::Requesting;

                let api = env.api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.export_history(from, to).await {
                        Ok(document) => {
                            Some(AccountAction::ExportDocumentReady { document })
                        },
                        Err(error) => Some(AccountAction::ExportFailed { error }),
                    }
                }))]
            },

            AccountAction::ExportDocumentReady { document } => {
                state.export = ExportPhase::Sharing;

                let files = env.files.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let bytes = match base64::engine::general_purpose::STANDARD
                        .decode(&document.base64)
                    {
                        Ok(bytes) => bytes,
                        Err(error) => {
                            return Some(AccountAction::ExportFailed {
                                error: ClientError::Share(error.to_string()),
                            });
                        },
                    };

                    match files.save_and_share(&document.file_name, bytes).await {
                        Ok(()) => Some(AccountAction::ExportShared),
                        Err(error) => Some(AccountAction::ExportFailed { error }),
                    }
                }))]
            },

            AccountAction::ExportShared => {
                state.export = ExportPhase::Idle;
                state.notice = Some(Notice::success("Histórico exportado"));
                SmallVec::new()
            },

            AccountAction::ExportFailed { error } => {
                state.export = ExportPhase::Idle;
                Self::apply_failure(state, &error);
                SmallVec::new()
            },

            AccountAction::NoticeDismissed => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}
