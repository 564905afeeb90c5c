//! Form submission for the Persist.Live landing page.
//!
//! This crate provides:
//! - `FormSubmissionController` - Validates, posts and reports one attempt per submit
//! - `WaitlistForm` / `ContactForm` - Per-form reading, checks and fallback texts
//! - `FormScope` - The only way the controller touches a form's DOM
//! - `StatusRenderer` - Status messages with success auto-hide
//! - `InFlight` - Loading state and the per-form in-flight guard
//! - `Analytics` - Best-effort conversion events
//!
//! # Example
//!
//! ```rust,ignore
//! use landing_core::LandingConfig;
//! use landing_data::FetchClient;
//! use landing_forms::{FormSubmissionController, TokioTimer};
//!
//! let controller =
//!     FormSubmissionController::new(&LandingConfig::default(), FetchClient::new(), TokioTimer);
//!
//! match controller.submit_waitlist(&form).await {
//!     outcome if outcome.is_success() => println!("joined"),
//!     outcome => eprintln!("{:?}", outcome.message()),
//! }
//! ```

mod analytics;
mod controller;
mod error;
mod flow;
mod handler;
mod loading;
mod scope;
mod status;
mod submission;
mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use analytics::*;
pub use controller::{FormSubmissionController, SubmissionOutcome};
pub use error::*;
pub use flow::{SubmissionAttempt, SubmissionState};
pub use handler::*;
pub use loading::{InFlight, LoadingGuard};
pub use scope::*;
pub use status::*;
pub use submission::*;
pub use validate::{is_valid_email, meets_min_len, MIN_MESSAGE_LEN, MIN_NAME_LEN};
