//! Domain layer for cnpj-lookup
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sources
//!
//! Three registry providers answer the same CNPJ lookup independently.
//! Exactly one of them is authoritative: its record always wins the view.
//!
//! ## Consensus
//!
//! Each record carries a tax regime vote. The displayed regime is the most
//! specific label reported by any source, flagged for attention when it does
//! not hold a strict majority.

pub mod consensus;
pub mod core;
pub mod extraction;
pub mod source;

// Re-export commonly used types
pub use consensus::{ConsensusDisplay, ConsensusState, ProviderVote, TaxRegime};
pub use core::{
    cnpj::{CNPJ_LEN, Cnpj, validate},
    error::CnpjError,
};
pub use extraction::{ProviderRules, Supplement, SupplementaryField};
pub use source::{FetchOutcome, ProviderId, RetryPolicy, SourceRecord};
