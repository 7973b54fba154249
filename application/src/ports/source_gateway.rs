//! Source gateway port
//!
//! Defines a single attempt against one registry provider. Retrying and the
//! fail-soft [`FetchOutcome`](lookup_domain::FetchOutcome) contract live in
//! [`QuerySourceUseCase`](crate::use_cases::query_source::QuerySourceUseCase).

use async_trait::async_trait;
use lookup_domain::{Cnpj, ProviderId, SourceRecord};
use thiserror::Error;

/// Why a single attempt failed
///
/// Every variant is retried under the provider's policy. Once retries are
/// exhausted they all surface the same way, as a `Failure` outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Provider reported an error: {0}")]
    Application(String),

    #[error("Invalid payload: {0}")]
    Decode(String),
}

impl SourceError {
    /// Transport-level failures (network, timeout, non-ok HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SourceError::Transport(_) | SourceError::Timeout | SourceError::HttpStatus { .. }
        )
    }
}

/// Gateway for one registry provider
///
/// Implementations (adapters) live in the infrastructure layer. A call is one
/// attempt: it must classify a well-formed payload carrying an embedded error
/// status as [`SourceError::Application`], never as a record.
#[async_trait]
pub trait SourceGateway: Send + Sync {
    /// The provider this gateway talks to
    fn provider(&self) -> ProviderId;

    /// Fetch the provider's record for `cnpj`
    async fn fetch(&self, cnpj: &Cnpj) -> Result<SourceRecord, SourceError>;
}
