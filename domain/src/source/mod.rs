//! Source providers, their records and retry policies.

pub mod provider;
pub mod record;
pub mod retry;

pub use provider::ProviderId;
pub use record::{FetchOutcome, SourceRecord};
pub use retry::RetryPolicy;
