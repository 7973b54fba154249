//! Console output for lookup results

use colored::Colorize;
use lookup_application::{LookupOutcome, LookupSummary, RenderEvent, RenderSink};
use lookup_domain::{ConsensusDisplay, ProviderId, SourceRecord, Supplement, SupplementaryField};
use serde_json::Value;
use std::io::Write;

/// Formats render events for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one render event
    pub fn format_event(event: &RenderEvent) -> String {
        match event {
            RenderEvent::InitialRender {
                provider,
                record,
                consensus,
                preliminary,
            } => Self::record_view(*provider, record, consensus, *preliminary),
            RenderEvent::SupplementaryUpdate {
                provider,
                supplement,
            } => Self::supplement(*provider, supplement),
            RenderEvent::ConsensusUpdated(consensus) => {
                format!("  {} {}\n", "Tax regime:".cyan().bold(), Self::consensus(consensus))
            }
            RenderEvent::ValidationRejected { input, reason } => format!(
                "{} {:?}: {}\n",
                "Invalid CNPJ".red().bold(),
                input,
                reason
            ),
            RenderEvent::AllSourcesFailed => format!(
                "{}\n",
                "No source answered. Try again later.".red().bold()
            ),
        }
    }

    /// One-line summary printed after a lookup settles
    pub fn format_summary(summary: &LookupSummary) -> String {
        match &summary.outcome {
            LookupOutcome::Rendered { provider, preliminary } => {
                let note = if *preliminary { ", preliminary" } else { "" };
                format!(
                    "{}\n",
                    format!(
                        "Done: rendered from {}{}, {} source(s) failed",
                        provider.display_name(),
                        note,
                        summary.failures
                    )
                    .dimmed()
                )
            }
            LookupOutcome::Superseded => {
                format!("{}\n", "Lookup superseded by a newer request".dimmed())
            }
            LookupOutcome::AllSourcesFailed | LookupOutcome::Rejected { .. } => String::new(),
        }
    }

    fn record_view(
        provider: ProviderId,
        record: &SourceRecord,
        consensus: &ConsensusDisplay,
        preliminary: bool,
    ) -> String {
        let mut output = String::new();

        let name = record
            .company_name()
            .unwrap_or_else(|| "(unnamed company)".to_string());
        output.push_str(&format!("\n{}\n", format!("── {} ──", name).yellow().bold()));

        output.push_str(&format!(
            "  {} {}\n",
            "Source:".cyan().bold(),
            provider.display_name()
        ));
        if let Some(region) = record.region() {
            output.push_str(&format!("  {} {}\n", "State:".cyan().bold(), region));
        }
        output.push_str(&format!(
            "  {} {}\n",
            "Tax regime:".cyan().bold(),
            Self::consensus(consensus)
        ));

        if preliminary {
            output.push_str(&format!(
                "  {}\n",
                "Preliminary data: the authoritative source has not confirmed this record"
                    .yellow()
            ));
        }

        output
    }

    fn consensus(consensus: &ConsensusDisplay) -> String {
        let text = consensus.to_string();
        if consensus.needs_attention {
            text.yellow().bold().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn supplement(provider: ProviderId, supplement: &Supplement) -> String {
        let mut output = format!(
            "  {} {}\n",
            format!("{}:", supplement.field.display_name()).cyan().bold(),
            format!("(from {})", provider.display_name()).dimmed()
        );

        let entries = supplement.data.as_array().map(Vec::as_slice).unwrap_or_default();
        if entries.is_empty() {
            output.push_str("    none\n");
        }
        for entry in entries {
            output.push_str(&format!("    {}\n", Self::entry(supplement.field, entry)));
        }
        output
    }

    fn entry(field: SupplementaryField, entry: &Value) -> String {
        let text = |key: &str| match entry.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let described = match field {
            SupplementaryField::TaxRegimeHistory => text("ano")
                .zip(text("forma_de_tributacao"))
                .map(|(year, regime)| format!("{}: {}", year, regime)),
            SupplementaryField::StateRegistrations => text("inscricao_estadual").map(|number| {
                let state = text("uf").unwrap_or_default();
                let status = match entry.get("ativo").and_then(Value::as_bool) {
                    Some(true) => " (active)",
                    Some(false) => " (inactive)",
                    None => "",
                };
                format!("{} {}{}", state, number, status).trim().to_string()
            }),
        };

        described.unwrap_or_else(|| entry.to_string())
    }
}

/// [`RenderSink`] that prints formatted events to stdout
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self
    }
}

impl RenderSink for ConsoleSink {
    fn emit(&self, event: RenderEvent) {
        let text = ConsoleFormatter::format_event(&event);
        let mut stdout = std::io::stdout().lock();
        // A closed stdout leaves nothing to report to
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}
