//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod lookup_company;
pub mod query_source;
pub mod reconcile;
