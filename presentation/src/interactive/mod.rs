//! Interactive mode
//!
//! Reads one CNPJ per line; each new line supersedes the lookup in progress.

mod session;

pub use session::InteractiveSession;
