//! Domain error types

use thiserror::Error;

/// Reasons a raw identifier is rejected before any provider is queried
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CnpjError {
    #[error("CNPJ must have 14 digits, got {0}")]
    InvalidLength(usize),

    #[error("CNPJ cannot consist of a single repeated digit")]
    RepeatedDigits,

    #[error("CNPJ check digits do not match")]
    ChecksumMismatch,
}
