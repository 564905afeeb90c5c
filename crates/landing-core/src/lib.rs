//! Core abstractions for the Persist.Live landing forms.
//!
//! This crate provides:
//! - `LandingConfig` - Backend origin, edge function paths and status timings
//! - `FormKind` - The two forms the page submits
//! - `SubmissionId` - Per-attempt identifier for log correlation
//! - `ConfigError` - Configuration loading and validation errors
//! - `MaybeSendSync` - `Send + Sync` on native targets, nothing in the browser

mod config;
mod context;
mod error;
mod platform;

pub use config::*;
pub use context::*;
pub use error::*;
pub use platform::*;
