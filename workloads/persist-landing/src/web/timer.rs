//! Auto-hide timer on `setTimeout`.

use std::time::Duration;

use landing_forms::{HideTask, Timer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// `window.setTimeout` timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn schedule(&self, delay: Duration, task: HideTask) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            web_sys::console::warn_2(&JsValue::from_str("setTimeout failed:"), &err);
        }
    }
}
