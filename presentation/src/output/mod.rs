//! Render sinks and formatters

pub mod console;
pub mod json;
