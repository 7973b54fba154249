//! Provider endpoints

use lookup_domain::{Cnpj, ProviderId};
use reqwest::Url;
use thiserror::Error;

/// A configured base or proxy URL could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid URL {url}: {reason}")]
pub struct EndpointError {
    pub url: String,
    pub reason: String,
}

impl EndpointError {
    fn new(url: &str, error: impl std::fmt::Display) -> Self {
        Self {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}

/// Where and how a provider is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    /// Base URL; the normalized CNPJ is appended as the last path segment
    pub base_url: String,
    /// Fetch proxy the request is routed through, passing the target as `?url=`
    pub proxy_url: Option<String>,
}

impl ProviderEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            proxy_url: None,
        }
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Public endpoint for each provider
    pub fn default_base_url(provider: ProviderId) -> &'static str {
        match provider {
            ProviderId::Authoritative => "https://publica.cnpj.ws/cnpj",
            ProviderId::Secondary1 => "https://brasilapi.com.br/api/cnpj/v1",
            ProviderId::Secondary2 => "https://receitaws.com.br/v1/cnpj",
        }
    }

    pub fn for_provider(provider: ProviderId) -> Self {
        Self::new(Self::default_base_url(provider))
    }

    /// The URL to request for `cnpj`, routed through the proxy when one is set.
    pub fn url_for(&self, cnpj: &Cnpj) -> Result<Url, EndpointError> {
        let target = format!("{}/{}", self.base_url.trim_end_matches('/'), cnpj.as_str());
        let target = Url::parse(&target).map_err(|e| EndpointError::new(&target, e))?;

        match &self.proxy_url {
            Some(proxy) => Url::parse_with_params(proxy, &[("url", target.as_str())])
                .map_err(|e| EndpointError::new(proxy, e)),
            None => Ok(target),
        }
    }
}
