//! ViaCEP address lookup.
//!
//! Resolves an 8-digit Brazilian postal code (CEP) to an address via the
//! public ViaCEP API so registration forms can auto-fill. One request per
//! lookup, no retries; any failure leaves the form fields untouched.
//!
//! ### Endpoint
//! `GET https://viacep.com.br/ws/{cep}/json/`

use serde::{Deserialize, Serialize};
use std::time::Duration;

use esperanca_core::Error;

/// Default base URL for the ViaCEP API.
const VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// An address resolved from a CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endereco {
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}

/// Raw ViaCEP payload. Unknown CEPs come back as `200 OK` with
/// `{"erro": true}`, so the flag has to be checked before trusting fields.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

/// ViaCEP API client.
#[derive(Debug, Clone)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    /// Create a new client with the given User-Agent.
    pub fn new(user_agent: &str) -> Result<Self, Error> {
        Self::with_base_url(user_agent, VIACEP_BASE_URL)
    }

    /// Create a client against a non-default endpoint (test servers).
    pub fn with_base_url(user_agent: &str, base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Retrieval(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Look up the address for a CEP. Accepts masked (`01310-100`) or bare
    /// (`01310100`) input; anything without exactly 8 digits is invalid.
    pub async fn lookup(&self, cep: &str) -> Result<Endereco, Error> {
        let digits: String = cep.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 8 {
            return Err(Error::InvalidInput(format!("CEP must have 8 digits, got {}", digits.len())));
        }

        let url = format!("{}/{}/json/", self.base_url, digits);
        tracing::debug!("looking up CEP {} at {}", digits, url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("network error for CEP {}: {}", digits, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Retrieval(format!("status {} for CEP {}", status.as_u16(), digits)));
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| Error::Retrieval(format!("invalid ViaCEP response: {}", e)))?;

        if body.erro {
            return Err(Error::CepNotFound(digits));
        }

        Ok(Endereco {
            cep: body.cep,
            logradouro: body.logradouro,
            bairro: body.bairro,
            localidade: body.localidade,
            uf: body.uf,
        })
    }
}
