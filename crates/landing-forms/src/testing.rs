//! In-memory collaborators for exercising the controller without a browser.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use landing_core::FormKind;
use landing_data::{FetchError, HttpTransport, RequestBuilder, Response};

use crate::analytics::{Analytics, AnalyticsError, AnalyticsEvent};
use crate::scope::{Field, FormScope, MessageKind};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct FormState {
    values: HashMap<Field, String>,
    checked: HashMap<Field, bool>,
    status: Option<(String, MessageKind)>,
    status_visible: bool,
    loading: bool,
    loading_history: Vec<bool>,
    resets: usize,
}

/// A form held in memory. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeForm {
    kind: FormKind,
    state: Arc<Mutex<FormState>>,
}

impl FakeForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            state: Arc::default(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn with_value(self, field: Field, value: impl Into<String>) -> Self {
        self.set_value(field, value);
        self
    }

    pub fn with_checked(self, field: Field, checked: bool) -> Self {
        self.set_checked(field, checked);
        self
    }

    pub fn set_value(&self, field: Field, value: impl Into<String>) {
        lock(&self.state).values.insert(field, value.into());
    }

    pub fn set_checked(&self, field: Field, checked: bool) {
        lock(&self.state).checked.insert(field, checked);
    }

    /// Last status text and kind, whether or not it is still visible.
    pub fn status(&self) -> Option<(String, MessageKind)> {
        lock(&self.state).status.clone()
    }

    pub fn status_visible(&self) -> bool {
        lock(&self.state).status_visible
    }

    pub fn loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Every `set_loading` call, in order.
    pub fn loading_history(&self) -> Vec<bool> {
        lock(&self.state).loading_history.clone()
    }

    pub fn reset_count(&self) -> usize {
        lock(&self.state).resets
    }
}

impl FormScope for FakeForm {
    fn value(&self, field: Field) -> String {
        lock(&self.state).values.get(&field).cloned().unwrap_or_default()
    }

    fn checked(&self, field: Field) -> bool {
        lock(&self.state).checked.get(&field).copied().unwrap_or(false)
    }

    fn show_status(&self, text: &str, kind: MessageKind) {
        let mut state = lock(&self.state);
        state.status = Some((text.to_string(), kind));
        state.status_visible = true;
    }

    fn hide_status(&self) {
        lock(&self.state).status_visible = false;
    }

    fn set_loading(&self, loading: bool) {
        let mut state = lock(&self.state);
        state.loading = loading;
        state.loading_history.push(loading);
    }

    fn reset(&self) {
        let mut state = lock(&self.state);
        state.values.clear();
        state.checked.clear();
        state.resets += 1;
    }
}

/// A request seen by [`StubTransport`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub content_type: Option<String>,
    /// Body parsed as JSON; `Null` when absent or not JSON.
    pub body: serde_json::Value,
}

enum Scripted {
    Reply(u16, String),
    Fail(String),
}

#[derive(Default)]
struct StubState {
    script: VecDeque<Scripted>,
    sent: Vec<SentRequest>,
}

/// Transport answering from a script. Replies `200 {}` once the script runs
/// out. Clones share state.
#[derive(Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
        lock(&self.state)
            .script
            .push_back(Scripted::Reply(status, body.into()));
        self
    }

    /// Queue a connection failure.
    pub fn fail(self, cause: impl Into<String>) -> Self {
        lock(&self.state)
            .script
            .push_back(Scripted::Fail(cause.into()));
        self
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        lock(&self.state).sent.clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state).sent.len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpTransport for StubTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let body = request
            .body_bytes()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or(serde_json::Value::Null);

        let mut state = lock(&self.state);
        state.sent.push(SentRequest {
            url: request.url().to_string(),
            content_type: request.header_value("content-type").map(str::to_string),
            body,
        });

        match state.script.pop_front() {
            Some(Scripted::Reply(status, body)) => {
                Ok(Response::new(status, body))
            }
            Some(Scripted::Fail(cause)) => Err(FetchError::Connection(cause)),
            None => Ok(Response::new(200, "{}")),
        }
    }
}

/// Records event names, or refuses every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<&'static str>>>,
    failing: bool,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// An analytics reporter that is never available.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<&'static str> {
        lock(&self.events).clone()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        if self.failing {
            return Err(AnalyticsError::Unavailable);
        }
        lock(&self.events).push(event.name);
        Ok(())
    }
}
