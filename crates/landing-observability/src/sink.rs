//! Log sinks.

use std::sync::{Arc, Mutex};

use landing_core::MaybeSendSync;

use crate::LogLevel;

/// Destination for rendered log lines.
pub trait LogSink: MaybeSendSync {
    fn write(&self, level: LogLevel, line: &str);
}

/// Forwards entries to `tracing` under the `landing` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "landing", "{}", line),
            LogLevel::Debug => tracing::debug!(target: "landing", "{}", line),
            LogLevel::Info => tracing::info!(target: "landing", "{}", line),
            LogLevel::Warn => tracing::warn!(target: "landing", "{}", line),
            LogLevel::Error => tracing::error!(target: "landing", "{}", line),
        }
    }
}

/// Keeps entries in memory. Used by tests to assert on diagnostics.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Lines written at `level`.
    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: LogLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line.to_string()));
        }
    }
}
