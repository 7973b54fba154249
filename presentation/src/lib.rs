//! Presentation layer for cnpj-lookup
//!
//! This crate contains CLI definitions, render sinks,
//! progress reporters, and the interactive lookup session.

pub mod cli;
pub mod interactive;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use interactive::InteractiveSession;
pub use output::console::{ConsoleFormatter, ConsoleSink};
pub use output::json::{JsonFormatter, JsonLinesSink};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
