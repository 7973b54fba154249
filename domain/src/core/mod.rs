//! Core domain concepts shared across all subdomains.
//!
//! - [`cnpj::Cnpj`] - a validated registry identifier
//! - [`error::CnpjError`] - identifier validation errors

pub mod cnpj;
pub mod error;
