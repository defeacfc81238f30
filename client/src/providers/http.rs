//! HTTP implementations of the backend traits.
//!
//! One thin `reqwest` wrapper per trait. The bearer token is injected on
//! every request; status codes map into the error taxonomy in one place so
//! reducers never see raw HTTP.

use crate::error::{ClientError, Result};
use crate::providers::accounts::{
    AccountsApi, ExportDocument, RegistrationPayload, StoredProfile, TwoFactorSecret,
};
use crate::providers::directory::{ProfessionalDirectory, SearchQuery};
use crate::state::{Page, Professional};
use chrono::NaiveDate;
use std::future::Future;

/// Map a transport-level failure.
fn map_transport(error: &reqwest::Error) -> ClientError {
    ClientError::Network {
        status: None,
        message: error.to_string(),
    }
}

/// Map an error-status response, reading the body for the backend message.
async fn map_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match status {
        401 | 403 => ClientError::SessionExpired,
        404 => ClientError::NotFound {
            what: if body.is_empty() { "recurso".to_string() } else { body },
        },
        _ => ClientError::Network {
            status: Some(status),
            message: body,
        },
    }
}

/// Check a response, mapping error statuses.
async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(map_response(response).await)
    }
}

/// REST backend client for the account flows.
#[derive(Debug, Clone)]
pub struct HttpAccountsApi {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpAccountsApi {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Attach the session's bearer token; injected on every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(|e| map_transport(&e))?;
        checked(response).await?;
        Ok(())
    }
}

impl AccountsApi for HttpAccountsApi {
    fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let payload = payload.clone();
        async move { this.post_json("/users", &payload).await }
    }

    fn update_profile(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let payload = payload.clone();
        async move {
            let response = this
                .authorize(this.http.put(this.url("/users/me")).json(&payload))
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response).await?;
            Ok(())
        }
    }

    fn fetch_profile(&self) -> impl Future<Output = Result<StoredProfile>> + Send {
        let this = self.clone();
        async move {
            let response = this
                .authorize(this.http.get(this.url("/users/me")))
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response)
                .await?
                .json()
                .await
                .map_err(|e| map_transport(&e))
        }
    }

    fn request_two_factor_secret(
        &self,
    ) -> impl Future<Output = Result<TwoFactorSecret>> + Send {
        let this = self.clone();
        async move {
            let response = this
                .authorize(this.http.post(this.url("/auth/2fa/secret")))
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response)
                .await?
                .json()
                .await
                .map_err(|e| map_transport(&e))
        }
    }

    fn confirm_two_factor(&self, code: &str) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let code = code.to_string();
        async move {
            this.post_json("/auth/2fa/confirm", &serde_json::json!({ "code": code }))
                .await
        }
    }

    fn disable_two_factor(&self) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        async move {
            let response = this
                .authorize(this.http.post(this.url("/auth/2fa/disable")))
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response).await?;
            Ok(())
        }
    }

    fn send_recovery_code(&self) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        async move {
            let response = this
                .authorize(this.http.post(this.url("/auth/recovery/send")))
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response).await?;
            Ok(())
        }
    }

    fn send_verification_email(&self) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        async move {
            let response = this
                .authorize(this.http.post(this.url("/auth/email/verification")))
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response).await?;
            Ok(())
        }
    }

    fn verify_recovery_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let code = code.to_string();
        async move {
            this.post_json("/auth/recovery/verify", &serde_json::json!({ "code": code }))
                .await
        }
    }

    fn export_history(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<ExportDocument>> + Send {
        let this = self.clone();
        async move {
            let response = this
                .authorize(this.http.get(this.url("/appointments/history/export")))
                .query(&[("from", from.to_string()), ("to", to.to_string())])
                .send()
                .await
                .map_err(|e| map_transport(&e))?;
            checked(response)
                .await?
                .json()
                .await
                .map_err(|e| map_transport(&e))
        }
    }
}

/// REST backend client for the directory search.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpDirectory {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Attach the session's bearer token; injected on every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

impl ProfessionalDirectory for HttpDirectory {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Page<Professional>>> + Send {
        let this = self.clone();
        let query = query.clone();
        async move {
            let mut request = this
                .http
                .get(format!("{}/professionals/search", this.base_url))
                .query(&[
                    ("term", query.term.clone()),
                    ("location", query.location.clone()),
                    ("sort", query.sort.as_str().to_string()),
                    ("page", query.page.to_string()),
                    ("size", query.page_size.to_string()),
                ]);

            if let Some(rating) = query.min_rating {
                request = request.query(&[("minRating", rating.to_string())]);
            }
            for specialty in &query.specialties {
                request = request.query(&[("specialty", specialty.clone())]);
            }
            if let Some(token) = &this.bearer_token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(|e| map_transport(&e))?;
            checked(response)
                .await?
                .json()
                .await
                .map_err(|e| map_transport(&e))
        }
    }
}
