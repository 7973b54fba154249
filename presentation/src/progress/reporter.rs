//! Progress reporting for lookups

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lookup_application::LookupProgress;
use lookup_domain::{Cnpj, ProviderId};
use std::sync::Mutex;
use std::time::Duration;

/// Reports provider completion with a spinner on stderr
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupProgress for ProgressReporter {
    fn on_lookup_start(&self, cnpj: &Cnpj, total_sources: usize) {
        let bar = ProgressBar::with_draw_target(
            Some(total_sources as u64),
            ProgressDrawTarget::stderr(),
        );
        bar.set_style(Self::style());
        bar.set_prefix(cnpj.formatted());
        bar.set_message("Querying sources...");
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_source_resolved(&self, provider: ProviderId, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {}", "v".green(), provider.display_name())
            } else {
                format!("{} {}", "x".red(), provider.display_name())
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_lookup_complete(&self) {
        let bar = self.bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI), for non-terminal stderr
pub struct SimpleProgress;

impl LookupProgress for SimpleProgress {
    fn on_lookup_start(&self, cnpj: &Cnpj, total_sources: usize) {
        eprintln!(
            "{} {} ({} sources)",
            "->".cyan(),
            cnpj.formatted().bold(),
            total_sources
        );
    }

    fn on_source_resolved(&self, provider: ProviderId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider.display_name());
        }
    }

    fn on_lookup_complete(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ProgressReporter::new();
        let cnpj = Cnpj::parse("11222333000181").unwrap();

        reporter.on_lookup_start(&cnpj, 3);
        reporter.on_source_resolved(ProviderId::Secondary1, true);
        reporter.on_source_resolved(ProviderId::Authoritative, false);
        assert_eq!(
            reporter.bar.lock().unwrap().as_ref().map(|bar| bar.position()),
            Some(2)
        );

        reporter.on_lookup_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_resolution_without_start_is_ignored() {
        let reporter = ProgressReporter::default();
        reporter.on_source_resolved(ProviderId::Secondary2, true);
        reporter.on_lookup_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
