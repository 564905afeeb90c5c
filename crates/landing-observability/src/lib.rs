//! Structured logging for the Persist.Live landing forms.
//!
//! This crate provides:
//! - `StructuredLogger` - Logs correlated by submission id and form
//! - `LogBuilder` - Fluent per-entry fields
//! - `LogSink` - Where rendered entries go (`tracing` by default)

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;

// Re-export the correlation types for convenience
pub use landing_core::{FormKind, SubmissionId};
