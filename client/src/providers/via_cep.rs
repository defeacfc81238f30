//! ViaCEP postal-lookup implementation.

use crate::address::PostalAddress;
use crate::error::{ClientError, Result};
use crate::providers::postal::PostalLookup;
use serde::Deserialize;
use std::future::Future;

/// ViaCEP wire shape.
///
/// An unknown CEP answers `200 OK` with `{"erro": true}` rather than a
/// 404, so the flag is part of the success body.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: bool,
}

/// Postal lookup backed by the public ViaCEP service.
#[derive(Debug, Clone)]
pub struct ViaCep {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCep {
    /// Lookup against the public ViaCEP host.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url("https://viacep.com.br/ws")
    }

    /// Lookup against a custom host (tests, proxies).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for ViaCep {
    fn default() -> Self {
        Self::new()
    }
}

impl PostalLookup for ViaCep {
    fn lookup(&self, cep: &str) -> impl Future<Output = Result<PostalAddress>> + Send {
        let url = format!("{}/{cep}/json/", self.base_url);
        let http = self.http.clone();

        async move {
            let response = http.get(&url).send().await.map_err(|e| ClientError::Network {
                status: None,
                message: e.to_string(),
            })?;

            if !response.status().is_success() {
                // ViaCEP answers 400 for a syntactically bad CEP.
                return Err(ClientError::CepNotFound);
            }

            let body: ViaCepResponse =
                response.json().await.map_err(|e| ClientError::Network {
                    status: None,
                    message: e.to_string(),
                })?;

            if body.erro {
                return Err(ClientError::CepNotFound);
            }

            Ok(PostalAddress {
                street: body.logradouro,
                district: body.bairro,
                city: body.localidade,
                state: body.uf,
            })
        }
    }
}
