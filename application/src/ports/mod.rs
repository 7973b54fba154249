//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters must implement.

pub mod progress;
pub mod render_sink;
pub mod source_gateway;
