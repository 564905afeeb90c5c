//! Browser console sink for the structured logger.

use landing_observability::{LogLevel, LogSink};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Writes log lines to the browser console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            LogLevel::Trace | LogLevel::Debug => console::debug_1(&line),
            LogLevel::Info => console::info_1(&line),
            LogLevel::Warn => console::warn_1(&line),
            LogLevel::Error => console::error_1(&line),
        }
    }
}
