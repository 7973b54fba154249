//! Per-provider record extraction
//!
//! Providers keep their native JSON shapes. Instead of forcing them into a
//! shared schema, each provider gets a [`ProviderRules`] implementation that
//! knows how to read its own records:
//!
//! | Provider | Error sentinel | Region | Unique field |
//! |----------|----------------|--------|--------------|
//! | CNPJ.ws | `status >= 400`, or `titulo` alone | `estabelecimento.estado.sigla` | – |
//! | BrasilAPI | `message` without `cnpj` | `uf` | [`SupplementaryField::TaxRegimeHistory`] |
//! | ReceitaWS | `status == "ERROR"` | `uf` | [`SupplementaryField::StateRegistrations`] |

mod brasilapi;
mod cnpjws;
mod receitaws;

pub use brasilapi::BrasilApiRules;
pub use cnpjws::CnpjWsRules;
pub use receitaws::ReceitaWsRules;

use crate::consensus::TaxRegime;
use crate::source::{ProviderId, SourceRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A narrow field only one provider contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementaryField {
    /// Yearly taxation history (`regime_tributario`)
    TaxRegimeHistory,
    /// State tax registrations, scoped to the entity's state when known
    StateRegistrations,
}

impl SupplementaryField {
    pub fn display_name(&self) -> &'static str {
        match self {
            SupplementaryField::TaxRegimeHistory => "Tax regime history",
            SupplementaryField::StateRegistrations => "State registrations",
        }
    }
}

impl std::fmt::Display for SupplementaryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Extracted supplementary data ready to merge into a rendered view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub field: SupplementaryField,
    pub data: Value,
}

impl Supplement {
    pub fn new(field: SupplementaryField, data: Value) -> Self {
        Self { field, data }
    }
}

/// How to read one provider's native record shape
///
/// Every method is a pure function of the payload.
pub trait ProviderRules: Send + Sync {
    /// Application-level error carried inside an otherwise well-formed payload.
    fn embedded_error(&self, payload: &Value) -> Option<String>;

    /// The provider's tax regime vote.
    fn vote(&self, payload: &Value) -> Option<TaxRegime>;

    /// Two-letter state code (UF) of the entity.
    fn region(&self, payload: &Value) -> Option<String>;

    /// Supplementary fields this provider uniquely contributes.
    ///
    /// `region` is the authoritative record's state when known; fields that
    /// depend on jurisdiction are scoped with it.
    fn supplements(&self, _payload: &Value, _region: Option<&str>) -> Vec<Supplement> {
        Vec::new()
    }

    /// Company legal name, for logs and headings.
    fn company_name(&self, payload: &Value) -> Option<String>;
}

impl ProviderId {
    /// Extraction rules for this provider's records.
    pub fn rules(&self) -> &'static dyn ProviderRules {
        match self {
            ProviderId::Authoritative => &CnpjWsRules,
            ProviderId::Secondary1 => &BrasilApiRules,
            ProviderId::Secondary2 => &ReceitaWsRules,
        }
    }
}

impl SourceRecord {
    pub fn vote(&self) -> Option<TaxRegime> {
        self.provider.rules().vote(&self.data)
    }

    pub fn region(&self) -> Option<String> {
        self.provider.rules().region(&self.data)
    }

    pub fn supplements(&self, region: Option<&str>) -> Vec<Supplement> {
        self.provider.rules().supplements(&self.data, region)
    }

    pub fn company_name(&self) -> Option<String> {
        self.provider.rules().company_name(&self.data)
    }
}

/// Read a "Sim"/"Não" flag.
pub(crate) fn sim_nao(value: Option<&Value>) -> Option<bool> {
    match value?.as_str()?.trim().to_lowercase().as_str() {
        "sim" | "s" => Some(true),
        "não" | "nao" | "n" => Some(false),
        _ => None,
    }
}

pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
