//! Provider identity

use serde::{Deserialize, Serialize};

/// One of the three registry data providers
///
/// Exactly one provider ([`ProviderId::Authoritative`]) is the source of
/// truth; its successful records always supersede a previous render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// CNPJ.ws public API
    Authoritative,
    /// BrasilAPI
    Secondary1,
    /// ReceitaWS
    Secondary2,
}

impl ProviderId {
    /// All providers, authoritative first.
    pub const ALL: [ProviderId; 3] = [
        ProviderId::Authoritative,
        ProviderId::Secondary1,
        ProviderId::Secondary2,
    ];

    pub fn is_authoritative(&self) -> bool {
        matches!(self, ProviderId::Authoritative)
    }

    /// Human-readable provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Authoritative => "CNPJ.ws",
            ProviderId::Secondary1 => "BrasilAPI",
            ProviderId::Secondary2 => "ReceitaWS",
        }
    }

    /// Stable short key used in configuration sections and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Authoritative => "cnpjws",
            ProviderId::Secondary1 => "brasilapi",
            ProviderId::Secondary2 => "receitaws",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cnpjws" | "cnpj.ws" | "authoritative" => Ok(ProviderId::Authoritative),
            "brasilapi" | "secondary1" => Ok(ProviderId::Secondary1),
            "receitaws" | "secondary2" => Ok(ProviderId::Secondary2),
            _ => Err(format!(
                "Unknown provider: {}. Valid: cnpjws, brasilapi, receitaws",
                s
            )),
        }
    }
}
