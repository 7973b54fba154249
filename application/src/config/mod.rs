//! Application-level configuration.
//!
//! - [`LookupConfig`] - per-provider retry policies and request timeout

pub mod lookup_config;

pub use lookup_config::LookupConfig;
