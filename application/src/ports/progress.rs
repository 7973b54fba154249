//! Progress notification port
//!
//! Defines the interface for reporting provider completion during a lookup.

use lookup_domain::{Cnpj, ProviderId};

/// Callback for progress updates during a lookup
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, ...).
pub trait LookupProgress: Send + Sync {
    /// Called once all providers have been launched
    fn on_lookup_start(&self, cnpj: &Cnpj, total_sources: usize);

    /// Called when a provider resolves, successfully or not
    fn on_source_resolved(&self, provider: ProviderId, success: bool);

    /// Called when every provider resolved or the lookup was superseded
    fn on_lookup_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl LookupProgress for NoProgress {
    fn on_lookup_start(&self, _cnpj: &Cnpj, _total_sources: usize) {}
    fn on_source_resolved(&self, _provider: ProviderId, _success: bool) {}
    fn on_lookup_complete(&self) {}
}
