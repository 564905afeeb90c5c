//! Browser bindings: DOM forms, `setTimeout`, `gtag` and the console.

mod analytics;
mod console;
mod dom;
mod timer;

use std::rc::Rc;

use landing_core::LandingConfig;
use landing_data::FetchClient;
use landing_forms::FormSubmissionController;
use landing_observability::{LogFormat, StructuredLogger};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::page::mount;

pub use analytics::GtagAnalytics;
pub use console::ConsoleSink;
pub use dom::{BrowserDocument, DomForm};
pub use timer::BrowserTimer;

/// Module entry point. Mounts the forms once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))?;

    if document.ready_state() == "loading" {
        let ready = document.clone();
        let callback = Closure::once_into_js(move || init(ready));
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    } else {
        init(document);
    }

    Ok(())
}

fn init(document: Document) {
    let logger = StructuredLogger::with_sink(ConsoleSink).with_format(LogFormat::Human);
    let controller = FormSubmissionController::new(
        &LandingConfig::default(),
        FetchClient::new(),
        BrowserTimer,
    )
    .with_analytics(GtagAnalytics)
    .with_logger(logger.clone());

    let report = mount(&BrowserDocument::new(document), Rc::new(controller));

    let mounted: Vec<&str> = report.mounted.iter().map(|kind| kind.name()).collect();
    logger
        .debug_builder("landing forms mounted")
        .field("forms", mounted.join(","))
        .emit();
}
