//! Lookup Company use case
//!
//! Fans one CNPJ lookup out to every configured source, fans the
//! resolutions back in through a single channel, and drives a
//! [`Reconciliation`] with them in arrival order.
//!
//! Each valid submission gets a request id from a shared generation counter.
//! Input that fails validation is rejected without touching the counter.
//! In-flight queries are never cancelled; once a newer submission bumps the
//! generation, the older lookup stops forwarding events and returns
//! [`LookupOutcome::Superseded`] while its tasks run to completion unobserved.

use crate::ports::progress::{LookupProgress, NoProgress};
use crate::ports::render_sink::{RenderEvent, RenderSink};
use crate::use_cases::query_source::QuerySourceUseCase;
use crate::use_cases::reconcile::Reconciliation;
use lookup_domain::{Cnpj, CnpjError, ConsensusDisplay, ConsensusState, FetchOutcome, ProviderId};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Errors building the use case
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupSetupError {
    #[error("No sources configured")]
    NoSources,

    #[error("Source {0} configured more than once")]
    DuplicateSource(ProviderId),

    #[error("No authoritative source configured")]
    MissingAuthoritative,
}

/// How a lookup ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// A view was rendered; `preliminary` when no authoritative record arrived.
    Rendered {
        provider: ProviderId,
        preliminary: bool,
    },
    AllSourcesFailed,
    Rejected { reason: String },
    /// A newer lookup started before this one settled.
    Superseded,
}

/// Summary returned once a lookup settles
///
/// A rejected submission carries the id of the lookup that was current when
/// it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupSummary {
    pub request_id: u64,
    pub cnpj: Option<Cnpj>,
    pub outcome: LookupOutcome,
    pub consensus: ConsensusDisplay,
    pub failures: usize,
}

/// Identity of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub id: u64,
}

/// One provider resolution, tagged with the request it belongs to
#[derive(Debug)]
struct Arrival {
    request: RequestContext,
    provider: ProviderId,
    outcome: FetchOutcome,
}

/// Use case for looking up a company across all sources
pub struct LookupCompanyUseCase {
    sources: Vec<Arc<QuerySourceUseCase>>,
    generation: AtomicU64,
}

impl LookupCompanyUseCase {
    /// Build from one query per provider.
    ///
    /// Exactly one authoritative source is required and providers may not repeat.
    pub fn new(sources: Vec<QuerySourceUseCase>) -> Result<Self, LookupSetupError> {
        if sources.is_empty() {
            return Err(LookupSetupError::NoSources);
        }

        let mut seen = Vec::with_capacity(sources.len());
        for source in &sources {
            let provider = source.provider();
            if seen.contains(&provider) {
                return Err(LookupSetupError::DuplicateSource(provider));
            }
            seen.push(provider);
        }
        if !seen.iter().any(ProviderId::is_authoritative) {
            return Err(LookupSetupError::MissingAuthoritative);
        }

        Ok(Self {
            sources: sources.into_iter().map(Arc::new).collect(),
            generation: AtomicU64::new(0),
        })
    }

    /// Whether `request` is still the latest submission.
    pub fn is_current(&self, request: RequestContext) -> bool {
        self.generation.load(Ordering::SeqCst) == request.id
    }

    fn begin_request(&self) -> RequestContext {
        RequestContext {
            id: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, raw_input: &str, sink: &dyn RenderSink) -> LookupSummary {
        self.execute_with_progress(raw_input, sink, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        raw_input: &str,
        sink: &dyn RenderSink,
        progress: &dyn LookupProgress,
    ) -> LookupSummary {
        let cnpj = match Cnpj::parse(raw_input) {
            Ok(cnpj) => cnpj,
            Err(e) => {
                let current = RequestContext {
                    id: self.generation.load(Ordering::SeqCst),
                };
                return self.reject(current, raw_input, e, sink);
            }
        };
        let request = self.begin_request();

        info!(
            "Lookup #{} for {} across {} sources",
            request.id,
            cnpj,
            self.sources.len()
        );

        let mut arrivals = self.fan_out(request, &cnpj);
        progress.on_lookup_start(&cnpj, self.sources.len());

        let mut state = Reconciliation::new(self.sources.len());
        let mut superseded = false;

        while let Some(arrival) = arrivals.recv().await {
            if !self.is_current(arrival.request) {
                debug!(
                    "Dropping {} result for stale lookup #{}",
                    arrival.provider, arrival.request.id
                );
                superseded = true;
                break;
            }

            progress.on_source_resolved(arrival.provider, arrival.outcome.is_success());
            for event in state.apply(arrival.provider, arrival.outcome) {
                // A newer submission may land between two events of one arrival
                if !self.is_current(request) {
                    debug!("Lookup #{} superseded before {}", request.id, event.kind());
                    superseded = true;
                    break;
                }
                debug!("Lookup #{} emits {}", request.id, event.kind());
                sink.emit(event);
            }

            if superseded || state.is_complete() {
                break;
            }
        }

        progress.on_lookup_complete();

        let outcome = if superseded {
            info!("Lookup #{} superseded, ignoring its remaining results", request.id);
            LookupOutcome::Superseded
        } else {
            match state.rendered_by() {
                Some(provider) => LookupOutcome::Rendered {
                    provider,
                    preliminary: state.is_preliminary(),
                },
                None => LookupOutcome::AllSourcesFailed,
            }
        };

        LookupSummary {
            request_id: request.id,
            cnpj: Some(cnpj),
            outcome,
            consensus: state.consensus(),
            failures: state.failures(),
        }
    }

    fn reject(
        &self,
        request: RequestContext,
        raw_input: &str,
        error: CnpjError,
        sink: &dyn RenderSink,
    ) -> LookupSummary {
        info!("Rejected {:?}: {}", raw_input, error);
        sink.emit(RenderEvent::ValidationRejected {
            input: raw_input.to_string(),
            reason: error.to_string(),
        });

        LookupSummary {
            request_id: request.id,
            cnpj: None,
            outcome: LookupOutcome::Rejected {
                reason: error.to_string(),
            },
            consensus: ConsensusState::new().display(),
            failures: 0,
        }
    }

    /// Launch every source concurrently; resolutions arrive on the returned channel.
    fn fan_out(&self, request: RequestContext, cnpj: &Cnpj) -> mpsc::UnboundedReceiver<Arrival> {
        let (tx, rx) = mpsc::unbounded_channel();

        for source in &self.sources {
            let source = Arc::clone(source);
            let cnpj = cnpj.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let provider = source.provider();
                let outcome = source.execute(&cnpj).await;
                // The receiver is gone once the lookup settles or is superseded
                let _ = tx.send(Arrival {
                    request,
                    provider,
                    outcome,
                });
            });
        }

        rx
    }
}
