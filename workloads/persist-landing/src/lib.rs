//! Persist.Live landing page - browser entry point.
//!
//! This workload:
//! - Finds the waitlist and contact forms on the page
//! - Mounts a submit handler on each form that is present
//! - Routes submissions through a shared `FormSubmissionController`
//!
//! Only `page` is target independent; the `web` module binds it to the DOM
//! when built for `wasm32`.

pub mod page;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use page::{
    check_elements, mount, required_selectors, MountError, MountReport, PageDocument, SubmitHandler,
};
