//! ReceitaWS record rules
//!
//! ReceitaWS answers HTTP 200 even for failures and signals them with
//! `"status": "ERROR"` in the body, so the envelope always has to be checked.

use super::{ProviderRules, Supplement, SupplementaryField, non_empty_str};
use crate::consensus::TaxRegime;
use serde_json::Value;

pub struct ReceitaWsRules;

impl ReceitaWsRules {
    fn optante(payload: &Value, key: &str) -> Option<bool> {
        payload.get(key)?.get("optante")?.as_bool()
    }

    fn registration_state(entry: &Value) -> Option<String> {
        non_empty_str(entry.get("uf"))
            .or_else(|| non_empty_str(entry.pointer("/estado/sigla")))
            .map(|s| s.to_uppercase())
    }
}

impl ProviderRules for ReceitaWsRules {
    fn embedded_error(&self, payload: &Value) -> Option<String> {
        match payload.get("status").and_then(Value::as_str) {
            Some(status) if status.eq_ignore_ascii_case("ok") => None,
            Some(_) => Some(
                non_empty_str(payload.get("message"))
                    .unwrap_or_else(|| "status ERROR".to_string()),
            ),
            None => Some("payload has no status".to_string()),
        }
    }

    fn vote(&self, payload: &Value) -> Option<TaxRegime> {
        if Self::optante(payload, "simei") == Some(true) {
            Some(TaxRegime::Simei)
        } else if Self::optante(payload, "simples") == Some(true) {
            Some(TaxRegime::Simples)
        } else if payload.get("simples").is_some_and(Value::is_object) {
            Some(TaxRegime::Normal)
        } else {
            None
        }
    }

    fn region(&self, payload: &Value) -> Option<String> {
        non_empty_str(payload.get("uf")).map(|s| s.to_uppercase())
    }

    fn supplements(&self, payload: &Value, region: Option<&str>) -> Vec<Supplement> {
        let Some(entries) = payload.get("inscricoes_estaduais").and_then(Value::as_array) else {
            return Vec::new();
        };

        let scoped: Vec<Value> = entries
            .iter()
            .filter(|entry| match region {
                Some(uf) => Self::registration_state(entry)
                    .is_some_and(|state| state.eq_ignore_ascii_case(uf)),
                None => true,
            })
            .cloned()
            .collect();

        vec![Supplement::new(
            SupplementaryField::StateRegistrations,
            Value::Array(scoped),
        )]
    }

    fn company_name(&self, payload: &Value) -> Option<String> {
        non_empty_str(payload.get("nome"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "status": "OK",
            "nome": "PADARIA EXEMPLO LTDA",
            "uf": "SP",
            "simples": {"optante": true},
            "simei": {"optante": false},
            "inscricoes_estaduais": [
                {"uf": "SP", "inscricao_estadual": "110042490114", "ativo": true},
                {"uf": "RJ", "inscricao_estadual": "86923890", "ativo": false}
            ]
        })
    }

    #[test]
    fn test_error_status_in_ok_envelope() {
        let payload = json!({"status": "ERROR", "message": "CNPJ rejeitado pela Receita Federal"});
        assert_eq!(
            ReceitaWsRules.embedded_error(&payload).as_deref(),
            Some("CNPJ rejeitado pela Receita Federal")
        );
        assert!(ReceitaWsRules.embedded_error(&sample()).is_none());
        assert!(ReceitaWsRules.embedded_error(&json!({"nome": "X"})).is_some());
    }

    #[test]
    fn test_votes() {
        assert_eq!(ReceitaWsRules.vote(&sample()), Some(TaxRegime::Simples));
        assert_eq!(
            ReceitaWsRules.vote(&json!({"simei": {"optante": true}})),
            Some(TaxRegime::Simei)
        );
        assert_eq!(
            ReceitaWsRules.vote(&json!({"simples": {"optante": false}})),
            Some(TaxRegime::Normal)
        );
        assert_eq!(ReceitaWsRules.vote(&json!({"status": "OK", "uf": "SP"})), None);
    }

    #[test]
    fn test_state_registrations_scoped_to_region() {
        let supplements = ReceitaWsRules.supplements(&sample(), Some("rj"));
        assert_eq!(supplements.len(), 1);
        assert_eq!(supplements[0].field, SupplementaryField::StateRegistrations);
        let entries = supplements[0].data.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["inscricao_estadual"], "86923890");
    }

    #[test]
    fn test_state_registrations_unscoped() {
        let supplements = ReceitaWsRules.supplements(&sample(), None);
        assert_eq!(supplements[0].data.as_array().unwrap().len(), 2);

        let without = json!({"status": "OK"});
        assert!(ReceitaWsRules.supplements(&without, Some("SP")).is_empty());
    }
}
