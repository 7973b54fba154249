//! Application layer for cnpj-lookup
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::LookupConfig;
pub use ports::{
    progress::{LookupProgress, NoProgress},
    render_sink::{NoRender, RenderEvent, RenderSink},
    source_gateway::{SourceError, SourceGateway},
};
pub use use_cases::lookup_company::{
    LookupCompanyUseCase, LookupOutcome, LookupSetupError, LookupSummary, RequestContext,
};
pub use use_cases::query_source::QuerySourceUseCase;
pub use use_cases::reconcile::Reconciliation;
