//! Render sink port
//!
//! Events emitted by the lookup orchestrator for the presentation layer to
//! render. A successful lookup produces no terminal event: success is the
//! sequence of render and update events itself.

use lookup_domain::{ConsensusDisplay, ProviderId, SourceRecord, Supplement};

/// Events emitted while reconciling one lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// Render the full view from `record`, replacing anything shown before.
    ///
    /// `preliminary` is set when the record did not come from the
    /// authoritative provider and may still be superseded.
    InitialRender {
        provider: ProviderId,
        record: SourceRecord,
        consensus: ConsensusDisplay,
        preliminary: bool,
    },
    /// Merge one supplementary field into the view without re-rendering.
    SupplementaryUpdate {
        provider: ProviderId,
        supplement: Supplement,
    },
    /// Replace only the displayed consensus.
    ConsensusUpdated(ConsensusDisplay),
    /// Input was rejected before any provider was queried.
    ValidationRejected { input: String, reason: String },
    /// Every provider failed and nothing was rendered.
    AllSourcesFailed,
}

impl RenderEvent {
    /// Short event name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            RenderEvent::InitialRender { .. } => "initial_render",
            RenderEvent::SupplementaryUpdate { .. } => "supplementary_update",
            RenderEvent::ConsensusUpdated(_) => "consensus_updated",
            RenderEvent::ValidationRejected { .. } => "validation_rejected",
            RenderEvent::AllSourcesFailed => "all_sources_failed",
        }
    }
}

/// Consumer of render events
///
/// Implementations live in the presentation layer (console, JSON lines, ...).
pub trait RenderSink: Send + Sync {
    fn emit(&self, event: RenderEvent);
}

/// Sink that discards every event
pub struct NoRender;

impl RenderSink for NoRender {
    fn emit(&self, _event: RenderEvent) {}
}
