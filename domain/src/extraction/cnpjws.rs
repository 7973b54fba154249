//! CNPJ.ws record rules
//!
//! Records are nested: company-wide data at the top level, the head office
//! under `estabelecimento`, and Simples/MEI options under `simples` as
//! `"Sim"`/`"Não"` strings.

use super::{ProviderRules, non_empty_str, sim_nao};
use crate::consensus::TaxRegime;
use serde_json::Value;

pub struct CnpjWsRules;

impl ProviderRules for CnpjWsRules {
    fn embedded_error(&self, payload: &Value) -> Option<String> {
        let status = payload.get("status").and_then(Value::as_u64);
        let has_record = payload.get("cnpj_raiz").is_some();

        if status.is_some_and(|s| s >= 400) || (!has_record && payload.get("titulo").is_some()) {
            let message = non_empty_str(payload.get("detalhes"))
                .or_else(|| non_empty_str(payload.get("titulo")))
                .unwrap_or_else(|| "unspecified error".to_string());
            return Some(match status {
                Some(code) => format!("{} (status {})", message, code),
                None => message,
            });
        }

        if !has_record {
            return Some("payload has no cnpj_raiz".to_string());
        }
        None
    }

    fn vote(&self, payload: &Value) -> Option<TaxRegime> {
        let simples = payload.get("simples").filter(|v| v.is_object())?;

        Some(if sim_nao(simples.get("mei")) == Some(true) {
            TaxRegime::Simei
        } else if sim_nao(simples.get("simples")) == Some(true) {
            TaxRegime::Simples
        } else {
            TaxRegime::Normal
        })
    }

    fn region(&self, payload: &Value) -> Option<String> {
        non_empty_str(payload.pointer("/estabelecimento/estado/sigla")).map(|s| s.to_uppercase())
    }

    fn company_name(&self, payload: &Value) -> Option<String> {
        non_empty_str(payload.get("razao_social"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "cnpj_raiz": "11222333",
            "razao_social": "PADARIA EXEMPLO LTDA",
            "simples": {"simples": "Sim", "mei": "Não"},
            "estabelecimento": {
                "cnpj": "11222333000181",
                "estado": {"sigla": "sp", "nome": "São Paulo"}
            }
        })
    }

    #[test]
    fn test_well_formed_record_has_no_error() {
        assert_eq!(CnpjWsRules.embedded_error(&sample()), None);
    }

    #[test]
    fn test_error_envelope() {
        let payload = json!({
            "status": 429,
            "titulo": "Muitas requisições",
            "detalhes": "Excedido o limite"
        });
        let error = CnpjWsRules.embedded_error(&payload).unwrap();
        assert!(error.contains("Excedido o limite"));
        assert!(error.contains("429"));

        let titled = json!({"titulo": "Não Encontrado"});
        assert_eq!(
            CnpjWsRules.embedded_error(&titled).as_deref(),
            Some("Não Encontrado")
        );
    }

    #[test]
    fn test_empty_object_is_error() {
        assert!(CnpjWsRules.embedded_error(&json!({})).is_some());
    }

    #[test]
    fn test_votes() {
        assert_eq!(CnpjWsRules.vote(&sample()), Some(TaxRegime::Simples));

        let mei = json!({"simples": {"simples": "Sim", "mei": "Sim"}});
        assert_eq!(CnpjWsRules.vote(&mei), Some(TaxRegime::Simei));

        let normal = json!({"simples": {"simples": "Não", "mei": "Não"}});
        assert_eq!(CnpjWsRules.vote(&normal), Some(TaxRegime::Normal));
    }

    #[test]
    fn test_missing_simples_block_casts_no_vote() {
        assert_eq!(CnpjWsRules.vote(&json!({"simples": null})), None);
        assert_eq!(CnpjWsRules.vote(&json!({})), None);
    }

    #[test]
    fn test_region_and_name() {
        assert_eq!(CnpjWsRules.region(&sample()).as_deref(), Some("SP"));
        assert_eq!(
            CnpjWsRules.company_name(&sample()).as_deref(),
            Some("PADARIA EXEMPLO LTDA")
        );
        assert!(CnpjWsRules.supplements(&sample(), Some("SP")).is_empty());
    }
}
