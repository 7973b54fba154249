//! Tax regime consensus domain
//!
//! Each provider reports one [`TaxRegime`] vote per lookup. The
//! [`ConsensusState`] turns up to three of them into a displayed regime plus
//! an agreement flag.
//!
//! ```text
//! votes (arrival order)          confirmed   needs_attention
//! [Simei]                        Simei       no   (1 vs 0)
//! [Simples, Normal]              Simples     yes  (1 vs 1)
//! [Normal, Normal, Simples]      Simples     yes  (1 vs 2)
//! [Simples, Simples, Normal]     Simples     no   (2 vs 1)
//! []                             Outros      no
//! ```

pub mod regime;
pub mod state;

pub use regime::TaxRegime;
pub use state::{ConsensusDisplay, ConsensusState, ProviderVote};
