//! Reconciliation state machine
//!
//! Consumes provider resolutions for one lookup in arrival order and decides
//! which render events they produce. It is synchronous and owns all
//! per-request state, so every interleaving of the three providers can be
//! exercised by feeding arrivals in a different order.
//!
//! Render decision on each success:
//!
//! ```text
//! authoritative                          -> InitialRender (final), re-merge secondaries
//! secondary, nothing rendered yet        -> InitialRender (preliminary)
//! secondary, already rendered            -> SupplementaryUpdate(s) + ConsensusUpdated
//! ```

use crate::ports::render_sink::RenderEvent;
use lookup_domain::{ConsensusDisplay, ConsensusState, FetchOutcome, ProviderId, SourceRecord};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Per-request reconciliation state
#[derive(Debug, Clone)]
pub struct Reconciliation {
    expected: usize,
    resolved: HashSet<ProviderId>,
    consensus: ConsensusState,
    rendered_by: Option<ProviderId>,
    authoritative_region: Option<String>,
    authoritative_delivered: bool,
    secondary_records: Vec<SourceRecord>,
    failures: usize,
}

impl Reconciliation {
    /// Track a lookup that launched `expected` providers.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            resolved: HashSet::new(),
            consensus: ConsensusState::new(),
            rendered_by: None,
            authoritative_region: None,
            authoritative_delivered: false,
            secondary_records: Vec::new(),
            failures: 0,
        }
    }

    /// Apply one provider resolution and return the events it produces.
    ///
    /// A second resolution from the same provider is ignored.
    pub fn apply(&mut self, provider: ProviderId, outcome: FetchOutcome) -> Vec<RenderEvent> {
        if !self.resolved.insert(provider) {
            warn!("{} resolved twice, ignoring", provider);
            return Vec::new();
        }

        match outcome {
            FetchOutcome::Success(record) => self.on_success(record),
            FetchOutcome::Failure(reason) => self.on_failure(provider, &reason),
        }
    }

    fn on_failure(&mut self, provider: ProviderId, reason: &str) -> Vec<RenderEvent> {
        self.failures += 1;
        debug!(
            "{} failed ({}/{} failures): {}",
            provider, self.failures, self.expected, reason
        );

        if self.failures == self.expected && self.rendered_by.is_none() {
            vec![RenderEvent::AllSourcesFailed]
        } else {
            Vec::new()
        }
    }

    fn on_success(&mut self, record: SourceRecord) -> Vec<RenderEvent> {
        let provider = record.provider;
        match record.vote() {
            Some(vote) => {
                if self.consensus.record(provider, vote) {
                    debug!(
                        "{} voted {}, consensus now {}",
                        provider,
                        vote,
                        self.consensus.confirmed()
                    );
                }
            }
            None => debug!("{} reported no tax regime, no vote cast", provider),
        }

        let mut events = Vec::new();

        if provider.is_authoritative() {
            self.authoritative_delivered = true;
            self.authoritative_region = record.region();
            self.rendered_by = Some(provider);
            events.push(RenderEvent::InitialRender {
                provider,
                record,
                consensus: self.consensus.display(),
                preliminary: false,
            });

            let region = self.authoritative_region.as_deref();
            for secondary in &self.secondary_records {
                events.extend(supplementary_events(secondary, region));
            }
            return events;
        }

        let region = self.authoritative_region.as_deref();
        if self.rendered_by.is_none() && !self.authoritative_delivered {
            self.rendered_by = Some(provider);
            events.push(RenderEvent::InitialRender {
                provider,
                record: record.clone(),
                consensus: self.consensus.display(),
                preliminary: true,
            });
            events.extend(supplementary_events(&record, region));
        } else {
            events.extend(supplementary_events(&record, region));
            events.push(RenderEvent::ConsensusUpdated(self.consensus.display()));
        }

        self.secondary_records.push(record);
        events
    }

    /// Every launched provider has resolved.
    pub fn is_complete(&self) -> bool {
        self.resolved.len() >= self.expected
    }

    pub fn rendered_by(&self) -> Option<ProviderId> {
        self.rendered_by
    }

    /// The current view came from a non-authoritative record.
    pub fn is_preliminary(&self) -> bool {
        self.rendered_by.is_some_and(|p| !p.is_authoritative())
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn consensus(&self) -> ConsensusDisplay {
        self.consensus.display()
    }

    pub fn consensus_state(&self) -> &ConsensusState {
        &self.consensus
    }
}

impl Default for Reconciliation {
    fn default() -> Self {
        Self::new(ProviderId::ALL.len())
    }
}

fn supplementary_events(record: &SourceRecord, region: Option<&str>) -> Vec<RenderEvent> {
    record
        .supplements(region)
        .into_iter()
        .map(|supplement| RenderEvent::SupplementaryUpdate {
            provider: record.provider,
            supplement,
        })
        .collect()
}
