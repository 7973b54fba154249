//! Source records and fetch outcomes
//!
//! A [`SourceRecord`] keeps the provider's native JSON shape. Reading it is
//! the job of the per-provider rules in [`crate::extraction`].

use super::provider::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provider-shaped record tagged with its origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub provider: ProviderId,
    pub data: Value,
    pub fetched_at: DateTime<Utc>,
}

impl SourceRecord {
    pub fn new(provider: ProviderId, data: Value) -> Self {
        Self {
            provider,
            data,
            fetched_at: Utc::now(),
        }
    }

    /// Look up a nested field by a `/`-separated pointer (e.g. `estabelecimento/estado/sigla`).
    pub fn field(&self, path: &str) -> Option<&Value> {
        path.split('/')
            .try_fold(&self.data, |value, key| value.get(key))
    }

    /// Look up a nested string field.
    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }
}

/// Resolved result of querying one provider
///
/// Adapters always resolve to one of these; they never raise.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(SourceRecord),
    Failure(String),
}

impl FetchOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        FetchOutcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn record(&self) -> Option<&SourceRecord> {
        match self {
            FetchOutcome::Success(record) => Some(record),
            FetchOutcome::Failure(_) => None,
        }
    }
}
