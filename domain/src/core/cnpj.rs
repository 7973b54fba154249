//! CNPJ value object
//!
//! A CNPJ is the 14-digit national registry identifier for Brazilian legal
//! entities. The last two digits are check digits computed with a weighted
//! modulo-11 procedure over the preceding digits.

use super::error::CnpjError;
use serde::{Deserialize, Serialize};

/// Number of digits in a normalized CNPJ.
pub const CNPJ_LEN: usize = 14;

const FIRST_CHECK_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_CHECK_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// A validated, normalized CNPJ (Value Object)
///
/// Always holds exactly 14 ASCII digits with correct check digits.
///
/// # Example
///
/// ```
/// use lookup_domain::Cnpj;
///
/// let cnpj = Cnpj::parse("11.222.333/0001-81").unwrap();
/// assert_eq!(cnpj.as_str(), "11222333000181");
/// assert_eq!(cnpj.formatted(), "11.222.333/0001-81");
///
/// assert!(Cnpj::parse("11.111.111/1111-11").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj {
    digits: String,
}

impl Cnpj {
    /// Normalize and validate raw user input.
    ///
    /// Every non-digit character is stripped before validation, so masked
    /// input (`11.222.333/0001-81`) and bare digits are both accepted.
    pub fn parse(raw: &str) -> Result<Self, CnpjError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != CNPJ_LEN {
            return Err(CnpjError::InvalidLength(digits.len()));
        }

        let bytes = digits.as_bytes();
        if bytes.iter().all(|b| *b == bytes[0]) {
            return Err(CnpjError::RepeatedDigits);
        }

        let values: Vec<u32> = bytes.iter().map(|b| u32::from(b - b'0')).collect();
        let first = check_digit(&values[..12], &FIRST_CHECK_WEIGHTS);
        let second = check_digit(&values[..13], &SECOND_CHECK_WEIGHTS);

        if values[12] != first || values[13] != second {
            return Err(CnpjError::ChecksumMismatch);
        }

        Ok(Self { digits })
    }

    /// The 14 normalized digits.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The conventional `NN.NNN.NNN/NNNN-NN` mask.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        )
    }
}

/// Check whether raw input is a valid CNPJ.
pub fn validate(raw: &str) -> bool {
    Cnpj::parse(raw).is_ok()
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

impl std::fmt::Display for Cnpj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl std::str::FromStr for Cnpj {
    type Err = CnpjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cnpj::parse(s)
    }
}

impl TryFrom<String> for Cnpj {
    type Error = CnpjError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cnpj::parse(&value)
    }
}

impl From<Cnpj> for String {
    fn from(value: Cnpj) -> Self {
        value.digits
    }
}
