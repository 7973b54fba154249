//! Query Source use case
//!
//! Wraps a single-attempt [`SourceGateway`] with the provider's bounded
//! retry policy and resolves to a [`FetchOutcome`] in every case.

use crate::ports::source_gateway::{SourceError, SourceGateway};
use lookup_domain::{Cnpj, FetchOutcome, ProviderId, RetryPolicy};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for querying one provider with retries
pub struct QuerySourceUseCase {
    gateway: Arc<dyn SourceGateway>,
    policy: RetryPolicy,
}

impl QuerySourceUseCase {
    pub fn new(gateway: Arc<dyn SourceGateway>, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Use the provider's default policy
    pub fn with_default_policy(gateway: Arc<dyn SourceGateway>) -> Self {
        let policy = RetryPolicy::for_provider(gateway.provider());
        Self::new(gateway, policy)
    }

    pub fn provider(&self) -> ProviderId {
        self.gateway.provider()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Query the provider, retrying until the attempt budget is spent.
    ///
    /// Never fails: exhausted retries resolve to [`FetchOutcome::Failure`]
    /// carrying the last attempt's error.
    pub async fn execute(&self, cnpj: &Cnpj) -> FetchOutcome {
        let provider = self.provider();
        let mut attempt = 1;

        loop {
            debug!("{}: attempt {}/{}", provider, attempt, self.policy.max_attempts);

            let error = match self.gateway.fetch(cnpj).await {
                Ok(record) if record.provider == provider => {
                    info!("{} answered on attempt {}", provider, attempt);
                    return FetchOutcome::Success(record);
                }
                Ok(record) => SourceError::Decode(format!(
                    "record tagged {} returned by {} gateway",
                    record.provider, provider
                )),
                Err(e) => e,
            };

            if !self.policy.should_retry(attempt) {
                warn!(
                    "{} failed after {} attempt(s): {}",
                    provider, attempt, error
                );
                return FetchOutcome::Failure(error.to_string());
            }

            warn!(
                "{} attempt {} failed ({}), retrying in {}ms",
                provider,
                attempt,
                error,
                self.policy.retry_delay.as_millis()
            );
            tokio::time::sleep(self.policy.retry_delay).await;
            attempt += 1;
        }
    }
}
