//! Consensus over per-provider tax regime votes
//!
//! The displayed regime is the most specific label any provider reported,
//! not the majority label. A single `Simei` vote outranks two `Normal`
//! votes. The `needs_attention` flag is where majority enters: it is raised
//! whenever the confirmed label does not hold a strict majority of the votes.

use super::regime::TaxRegime;
use crate::source::ProviderId;
use serde::{Deserialize, Serialize};

/// A single provider's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVote {
    pub provider: ProviderId,
    pub regime: TaxRegime,
}

/// Votes received so far, in arrival order
///
/// `confirmed` and `needs_attention` are derived on every read, so they can
/// change as later votes arrive.
///
/// # Example
///
/// ```
/// use lookup_domain::{ConsensusState, ProviderId, TaxRegime};
///
/// let mut state = ConsensusState::new();
/// state.record(ProviderId::Secondary1, TaxRegime::Normal);
/// state.record(ProviderId::Secondary2, TaxRegime::Normal);
/// state.record(ProviderId::Authoritative, TaxRegime::Simples);
///
/// assert_eq!(state.confirmed(), TaxRegime::Simples);
/// assert!(state.needs_attention());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    votes: Vec<ProviderVote>,
}

impl ConsensusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a provider's vote.
    ///
    /// A repeated vote from the same provider replaces the earlier one in
    /// place. Returns `true` when the derived display changed.
    pub fn record(&mut self, provider: ProviderId, regime: TaxRegime) -> bool {
        let before = self.display();

        match self.votes.iter_mut().find(|v| v.provider == provider) {
            Some(existing) => existing.regime = regime,
            None => self.votes.push(ProviderVote { provider, regime }),
        }

        self.display() != before
    }

    pub fn votes(&self) -> &[ProviderVote] {
        &self.votes
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Highest-priority label present, or [`TaxRegime::Outros`] with no votes.
    pub fn confirmed(&self) -> TaxRegime {
        self.votes
            .iter()
            .map(|v| v.regime)
            .max()
            .unwrap_or_default()
    }

    /// Number of votes for the confirmed label.
    pub fn agreeing(&self) -> usize {
        let confirmed = self.confirmed();
        self.votes.iter().filter(|v| v.regime == confirmed).count()
    }

    /// Number of votes for any other label.
    pub fn dissenting(&self) -> usize {
        self.votes.len() - self.agreeing()
    }

    /// True when the confirmed label does not hold a strict majority.
    pub fn needs_attention(&self) -> bool {
        if self.votes.is_empty() {
            return false;
        }
        self.agreeing() <= self.dissenting()
    }

    /// Snapshot for rendering
    pub fn display(&self) -> ConsensusDisplay {
        ConsensusDisplay {
            regime: self.confirmed(),
            needs_attention: self.needs_attention(),
            agreeing: self.agreeing(),
            total: self.votes.len(),
        }
    }
}

/// Rendered view of the current consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusDisplay {
    pub regime: TaxRegime,
    pub needs_attention: bool,
    pub agreeing: usize,
    pub total: usize,
}

impl ConsensusDisplay {
    /// Agreement summary, e.g. `"1/2 sources"`
    pub fn agreement(&self) -> String {
        format!("{}/{} sources", self.agreeing, self.total)
    }
}

impl std::fmt::Display for ConsensusDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.total == 0 {
            return write!(f, "{}", self.regime.description());
        }
        write!(f, "{} ({})", self.regime.description(), self.agreement())?;
        if self.needs_attention {
            write!(f, " - verify")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProviderId::*;
    use TaxRegime::*;

    fn state_of(votes: &[(ProviderId, TaxRegime)]) -> ConsensusState {
        let mut state = ConsensusState::new();
        for (provider, regime) in votes {
            state.record(*provider, *regime);
        }
        state
    }

    #[test]
    fn test_simei_always_wins() {
        let cases = [
            vec![(Authoritative, Simei)],
            vec![(Authoritative, Normal), (Secondary1, Normal), (Secondary2, Simei)],
            vec![(Secondary1, Simples), (Secondary2, Simei), (Authoritative, Outros)],
            vec![(Secondary2, Simei), (Authoritative, Simples)],
        ];
        for votes in cases {
            assert_eq!(state_of(&votes).confirmed(), Simei, "votes: {:?}", votes);
        }
    }

    #[test]
    fn test_one_vs_one_tie() {
        let state = state_of(&[(Secondary1, Simples), (Secondary2, Normal)]);
        assert_eq!(state.confirmed(), Simples);
        assert!(state.needs_attention());
    }

    #[test]
    fn test_priority_overrides_minority() {
        let state = state_of(&[
            (Secondary1, Normal),
            (Secondary2, Normal),
            (Authoritative, Simples),
        ]);
        assert_eq!(state.confirmed(), Simples);
        assert_eq!(state.agreeing(), 1);
        assert_eq!(state.dissenting(), 2);
        assert!(state.needs_attention());
    }

    #[test]
    fn test_single_vote() {
        let state = state_of(&[(Authoritative, Simei)]);
        assert_eq!(state.confirmed(), Simei);
        assert!(!state.needs_attention());
    }

    #[test]
    fn test_no_votes() {
        let state = ConsensusState::new();
        assert_eq!(state.confirmed(), Outros);
        assert!(!state.needs_attention());
        assert_eq!(state.display().total, 0);
    }

    #[test]
    fn test_majority_agreement() {
        let state = state_of(&[
            (Authoritative, Simples),
            (Secondary1, Simples),
            (Secondary2, Normal),
        ]);
        assert_eq!(state.confirmed(), Simples);
        assert!(!state.needs_attention());
    }

    #[test]
    fn test_recomputes_as_votes_arrive() {
        let mut state = ConsensusState::new();
        assert!(state.record(Secondary1, Normal));
        assert_eq!(state.confirmed(), Normal);

        assert!(state.record(Secondary2, Simples));
        assert_eq!(state.confirmed(), Simples);
        assert!(state.needs_attention());

        assert!(state.record(Authoritative, Simples));
        assert!(!state.needs_attention());
    }

    #[test]
    fn test_record_reports_unchanged_display() {
        let mut state = state_of(&[(Authoritative, Simples), (Secondary1, Simples)]);
        // 2 Simples + 1 Normal still yields Simples without attention, but the counts move
        assert!(state.record(Secondary2, Normal));
        // same provider, same vote
        assert!(!state.record(Secondary2, Normal));
    }

    #[test]
    fn test_repeat_vote_replaces_in_place() {
        let mut state = state_of(&[(Secondary1, Normal), (Secondary2, Simples)]);
        state.record(Secondary1, Simples);
        assert_eq!(state.votes().len(), 2);
        assert_eq!(state.votes()[0].provider, Secondary1);
        assert_eq!(state.votes()[0].regime, Simples);
        assert!(!state.needs_attention());
    }

    #[test]
    fn test_display_format() {
        let state = state_of(&[(Secondary1, Simples), (Secondary2, Normal)]);
        assert_eq!(
            state.display().to_string(),
            "Simples Nacional (1/2 sources) - verify"
        );
        assert_eq!(
            ConsensusState::new().display().to_string(),
            "Outros / não informado"
        );
    }
}
