//! BrasilAPI record rules
//!
//! Flat records with boolean Simples/MEI flags. BrasilAPI is the only source
//! that publishes the yearly taxation history (`regime_tributario`).

use super::{ProviderRules, Supplement, SupplementaryField, non_empty_str};
use crate::consensus::TaxRegime;
use serde_json::Value;

pub struct BrasilApiRules;

impl ProviderRules for BrasilApiRules {
    fn embedded_error(&self, payload: &Value) -> Option<String> {
        if payload.get("cnpj").is_some() {
            return None;
        }
        Some(
            non_empty_str(payload.get("message"))
                .unwrap_or_else(|| "payload has no cnpj".to_string()),
        )
    }

    fn vote(&self, payload: &Value) -> Option<TaxRegime> {
        let mei = payload.get("opcao_pelo_mei").and_then(Value::as_bool);
        let simples = payload.get("opcao_pelo_simples").and_then(Value::as_bool);

        match (mei, simples) {
            (Some(true), _) => Some(TaxRegime::Simei),
            (_, Some(true)) => Some(TaxRegime::Simples),
            (Some(false), _) | (_, Some(false)) => Some(TaxRegime::Normal),
            _ => None,
        }
    }

    fn region(&self, payload: &Value) -> Option<String> {
        non_empty_str(payload.get("uf")).map(|s| s.to_uppercase())
    }

    fn supplements(&self, payload: &Value, _region: Option<&str>) -> Vec<Supplement> {
        match payload.get("regime_tributario") {
            Some(history) if history.as_array().is_some_and(|e| !e.is_empty()) => {
                vec![Supplement::new(
                    SupplementaryField::TaxRegimeHistory,
                    history.clone(),
                )]
            }
            _ => Vec::new(),
        }
    }

    fn company_name(&self, payload: &Value) -> Option<String> {
        non_empty_str(payload.get("razao_social"))
    }
}
