//! JSON lines output
//!
//! One JSON object per render event, suited for piping into other tools.

use lookup_application::{LookupSummary, RenderEvent, RenderSink};
use serde_json::{Value, json};
use std::io::Write;

/// Converts render events to JSON values
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn event(event: &RenderEvent) -> Value {
        let body = match event {
            RenderEvent::InitialRender {
                provider,
                record,
                consensus,
                preliminary,
            } => json!({
                "provider": provider,
                "preliminary": preliminary,
                "company_name": record.company_name(),
                "region": record.region(),
                "consensus": consensus,
                "record": record,
            }),
            RenderEvent::SupplementaryUpdate {
                provider,
                supplement,
            } => json!({
                "provider": provider,
                "field": supplement.field,
                "data": supplement.data,
            }),
            RenderEvent::ConsensusUpdated(consensus) => json!({ "consensus": consensus }),
            RenderEvent::ValidationRejected { input, reason } => json!({
                "input": input,
                "reason": reason,
            }),
            RenderEvent::AllSourcesFailed => json!({}),
        };

        let mut value = json!({ "event": event.kind() });
        if let (Some(target), Value::Object(fields)) = (value.as_object_mut(), body) {
            target.extend(fields);
        }
        value
    }

    pub fn summary(summary: &LookupSummary) -> Value {
        json!({ "event": "lookup_complete", "summary": summary })
    }
}

/// [`RenderSink`] that writes one JSON object per line to stdout
pub struct JsonLinesSink;

impl JsonLinesSink {
    pub fn write_line(value: &Value) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", value);
        let _ = stdout.flush();
    }
}

impl RenderSink for JsonLinesSink {
    fn emit(&self, event: RenderEvent) {
        Self::write_line(&JsonFormatter::event(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_domain::{
        ConsensusState, ProviderId, SourceRecord, Supplement, SupplementaryField, TaxRegime,
    };

    #[test]
    fn test_initial_render_json() {
        let mut state = ConsensusState::new();
        state.record(ProviderId::Secondary2, TaxRegime::Simei);
        let event = RenderEvent::InitialRender {
            provider: ProviderId::Secondary2,
            record: SourceRecord::new(
                ProviderId::Secondary2,
                json!({"status": "OK", "nome": "MEI EXEMPLO", "uf": "RJ"}),
            ),
            consensus: state.display(),
            preliminary: true,
        };

        let value = JsonFormatter::event(&event);
        assert_eq!(value["event"], "initial_render");
        assert_eq!(value["preliminary"], true);
        assert_eq!(value["company_name"], "MEI EXEMPLO");
        assert_eq!(value["region"], "RJ");
        assert_eq!(value["consensus"]["agreeing"], 1);
        assert_eq!(value["record"]["data"]["nome"], "MEI EXEMPLO");
    }

    #[test]
    fn test_supplement_json() {
        let event = RenderEvent::SupplementaryUpdate {
            provider: ProviderId::Secondary1,
            supplement: Supplement::new(
                SupplementaryField::TaxRegimeHistory,
                json!([{"ano": 2022}]),
            ),
        };
        let value = JsonFormatter::event(&event);
        assert_eq!(value["event"], "supplementary_update");
        assert_eq!(value["field"], "tax_regime_history");
        assert_eq!(value["data"][0]["ano"], 2022);
    }

    #[test]
    fn test_all_sources_failed_json() {
        let value = JsonFormatter::event(&RenderEvent::AllSourcesFailed);
        assert_eq!(value, json!({"event": "all_sources_failed"}));
    }
}
