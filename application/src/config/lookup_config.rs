//! Lookup configuration.
//!
//! Controls how each provider is queried. Infrastructure builds this from
//! the configuration file; use cases only see the resolved policies.

use crate::ports::source_gateway::SourceGateway;
use crate::use_cases::lookup_company::{LookupCompanyUseCase, LookupSetupError};
use crate::use_cases::query_source::QuerySourceUseCase;
use lookup_domain::{ProviderId, RetryPolicy};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Per-provider query behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    policies: HashMap<ProviderId, RetryPolicy>,
    /// Maximum time to wait for a single HTTP attempt.
    pub timeout: Option<Duration>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            policies: ProviderId::ALL
                .iter()
                .map(|p| (*p, RetryPolicy::for_provider(*p)))
                .collect(),
            timeout: None,
        }
    }
}

impl LookupConfig {
    /// Override one provider's retry policy.
    pub fn with_policy(mut self, provider: ProviderId, policy: RetryPolicy) -> Self {
        self.policies.insert(provider, policy);
        self
    }

    /// Creates a LookupConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    pub fn policy_for(&self, provider: ProviderId) -> RetryPolicy {
        self.policies
            .get(&provider)
            .copied()
            .unwrap_or_else(|| RetryPolicy::for_provider(provider))
    }

    /// Wire gateways into a lookup use case using this configuration's policies.
    pub fn build_lookup(
        &self,
        gateways: Vec<Arc<dyn SourceGateway>>,
    ) -> Result<LookupCompanyUseCase, LookupSetupError> {
        let sources = gateways
            .into_iter()
            .map(|gateway| {
                let policy = self.policy_for(gateway.provider());
                QuerySourceUseCase::new(gateway, policy)
            })
            .collect();
        LookupCompanyUseCase::new(sources)
    }
}
