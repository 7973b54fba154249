//! Registry provider adapters
//!
//! All three providers speak plain HTTP + JSON, so a single
//! [`HttpSourceGateway`] serves them; what differs is the endpoint and the
//! per-provider [`ProviderRules`](lookup_domain::ProviderRules) applied to
//! the payload.

mod endpoint;
mod http_gateway;

pub use endpoint::{EndpointError, ProviderEndpoint};
pub use http_gateway::{DEFAULT_USER_AGENT, HttpSourceGateway, build_client};

use crate::config::FileConfig;
use lookup_application::{LookupConfig, SourceGateway};
use lookup_domain::ProviderId;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Failure to build the provider gateways
#[derive(Error, Debug)]
pub enum GatewayBuildError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build one gateway per provider from the configuration.
///
/// Endpoints come from `config`; the per-attempt timeout comes from the
/// resolved `lookup` settings. All gateways share one connection pool.
pub fn build_gateways(
    config: &FileConfig,
    lookup: &LookupConfig,
) -> Result<Vec<Arc<dyn SourceGateway>>, GatewayBuildError> {
    debug!("HTTP timeout: {:?}", lookup.timeout);
    let client = build_client(lookup.timeout, &config.http.user_agent)?;

    let gateways = ProviderId::ALL
        .iter()
        .map(|provider| {
            let settings = config.providers.get(*provider);
            let mut endpoint = ProviderEndpoint::new(settings.base_url.clone());
            if settings.use_proxy {
                if let Some(proxy) = &config.http.proxy_url {
                    endpoint = endpoint.with_proxy(proxy.clone());
                }
            }
            debug!(
                "{} -> {}{}",
                provider,
                endpoint.base_url,
                if endpoint.proxy_url.is_some() { " (proxied)" } else { "" }
            );
            Arc::new(HttpSourceGateway::new(*provider, endpoint, client.clone()))
                as Arc<dyn SourceGateway>
        })
        .collect();

    Ok(gateways)
}
