//! Tax regime labels used as consensus votes

use serde::{Deserialize, Serialize};

/// Tax regime classification reported by a provider
///
/// Variants are declared from least to most specific so the derived [`Ord`]
/// matches the priority order `Simei > Simples > Normal > Outros`.
///
/// # Example
///
/// ```
/// use lookup_domain::TaxRegime;
///
/// assert!(TaxRegime::Simei > TaxRegime::Simples);
/// assert!(TaxRegime::Normal > TaxRegime::Outros);
/// assert_eq!(TaxRegime::default(), TaxRegime::Outros);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum TaxRegime {
    /// No classification could be determined
    #[default]
    Outros,
    /// Regular regime (Lucro Presumido / Lucro Real)
    Normal,
    /// Simples Nacional
    Simples,
    /// Microempreendedor Individual (SIMEI)
    Simei,
}

impl TaxRegime {
    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            TaxRegime::Simei => "SIMEI",
            TaxRegime::Simples => "Simples",
            TaxRegime::Normal => "Normal",
            TaxRegime::Outros => "Outros",
        }
    }

    /// Longer description for display
    pub fn description(&self) -> &'static str {
        match self {
            TaxRegime::Simei => "SIMEI (Microempreendedor Individual)",
            TaxRegime::Simples => "Simples Nacional",
            TaxRegime::Normal => "Regime normal (Lucro Presumido/Real)",
            TaxRegime::Outros => "Outros / não informado",
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TaxRegime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simei" | "mei" => Ok(TaxRegime::Simei),
            "simples" | "simples nacional" => Ok(TaxRegime::Simples),
            "normal" => Ok(TaxRegime::Normal),
            "outros" => Ok(TaxRegime::Outros),
            _ => Err(format!(
                "Unknown tax regime: {}. Valid: simei, simples, normal, outros",
                s
            )),
        }
    }
}
