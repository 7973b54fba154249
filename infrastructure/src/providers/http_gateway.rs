//! HTTP gateway for registry providers
//!
//! One [`HttpSourceGateway`] per provider. Every fetch is a single GET; the
//! JSON body is checked against the provider's [`ProviderRules`] so an
//! embedded error status never reaches the application layer as a record.

use super::endpoint::ProviderEndpoint;
use async_trait::async_trait;
use lookup_application::{SourceError, SourceGateway};
use lookup_domain::{Cnpj, ProviderId, ProviderRules, SourceRecord};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = concat!("cnpj-lookup/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
pub fn build_client(
    timeout: Option<Duration>,
    user_agent: &str,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// [`SourceGateway`] over plain HTTP + JSON
pub struct HttpSourceGateway {
    provider: ProviderId,
    endpoint: ProviderEndpoint,
    client: reqwest::Client,
}

impl HttpSourceGateway {
    pub fn new(provider: ProviderId, endpoint: ProviderEndpoint, client: reqwest::Client) -> Self {
        Self {
            provider,
            endpoint,
            client,
        }
    }

    fn rules(&self) -> &'static dyn ProviderRules {
        self.provider.rules()
    }
}

fn map_request_error(error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Transport(error.to_string())
    }
}

#[async_trait]
impl SourceGateway for HttpSourceGateway {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn fetch(&self, cnpj: &Cnpj) -> Result<SourceRecord, SourceError> {
        let url = self
            .endpoint
            .url_for(cnpj)
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        debug!("{}: GET {}", self.provider, url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;
        trace!("{}: {} ({} bytes)", self.provider, status, body.len());

        let payload = serde_json::from_str::<Value>(&body);

        if !status.is_success() {
            // Providers describe most rejections in a JSON body
            let message = payload
                .ok()
                .and_then(|p| self.rules().embedded_error(&p))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let payload = payload.map_err(|e| SourceError::Decode(e.to_string()))?;
        if !payload.is_object() {
            return Err(SourceError::Decode("expected a JSON object".to_string()));
        }
        if let Some(message) = self.rules().embedded_error(&payload) {
            return Err(SourceError::Application(message));
        }

        Ok(SourceRecord::new(self.provider, payload))
    }
}
