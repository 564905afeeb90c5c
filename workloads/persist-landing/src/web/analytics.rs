//! Google Analytics events through the page's `gtag` global.

use js_sys::{Function, Object, Reflect};
use landing_forms::{Analytics, AnalyticsError, AnalyticsEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Calls `window.gtag('event', name, {event_category, event_label})` when the
/// page has loaded it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtagAnalytics;

fn rejected(err: JsValue) -> AnalyticsError {
    AnalyticsError::Rejected(format!("{:?}", err))
}

impl Analytics for GtagAnalytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let window = web_sys::window().ok_or(AnalyticsError::Unavailable)?;
        let gtag = Reflect::get(&window, &JsValue::from_str("gtag"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or(AnalyticsError::Unavailable)?;

        let params = Object::new();
        Reflect::set(
            &params,
            &JsValue::from_str("event_category"),
            &JsValue::from_str(event.category),
        )
        .map_err(rejected)?;
        Reflect::set(
            &params,
            &JsValue::from_str("event_label"),
            &JsValue::from_str(event.label),
        )
        .map_err(rejected)?;

        gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event.name),
            &params,
        )
        .map(|_| ())
        .map_err(rejected)
    }
}
