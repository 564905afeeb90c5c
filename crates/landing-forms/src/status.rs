//! Scoped status messages with success auto-hide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use landing_core::MaybeSendSync;

use crate::scope::{FormScope, MessageKind};

/// Deferred work handed to a [`Timer`].
#[cfg(not(target_arch = "wasm32"))]
pub type HideTask = Box<dyn FnOnce() + Send + 'static>;

/// Deferred work handed to a [`Timer`].
#[cfg(target_arch = "wasm32")]
pub type HideTask = Box<dyn FnOnce() + 'static>;

/// Single-shot timer used for auto-hiding success messages.
pub trait Timer: MaybeSendSync {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: HideTask);
}

/// Timer backed by the ambient tokio runtime.
///
/// Honors paused time, so tests can drive the auto-hide deterministically.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(not(target_arch = "wasm32"))]
impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, task: HideTask) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    task();
                });
            }
            Err(_) => tracing::debug!("no tokio runtime; status message will not auto-hide"),
        }
    }
}

/// Renders one form's status messages.
///
/// Each call supersedes the previous one: a pending auto-hide only fires if
/// nothing was shown after it was scheduled.
#[derive(Clone)]
pub struct StatusRenderer {
    generation: Arc<AtomicU64>,
    hide_after: Duration,
    timer: Arc<dyn Timer>,
}

impl StatusRenderer {
    /// Create a renderer that hides success messages after `hide_after`.
    pub fn new(hide_after: Duration, timer: Arc<dyn Timer>) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            hide_after,
            timer,
        }
    }

    /// Show `text` in the scope's status region.
    pub fn show<S: FormScope>(&self, scope: &S, text: &str, kind: MessageKind) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        scope.show_status(text, kind);

        if kind.auto_hides() {
            let scope = scope.clone();
            let current = Arc::clone(&self.generation);
            self.timer.schedule(
                self.hide_after,
                Box::new(move || {
                    if current.load(Ordering::SeqCst) == generation {
                        scope.hide_status();
                    }
                }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeForm;
    use landing_core::FormKind;

    const HIDE: Duration = Duration::from_millis(5000);

    fn renderer() -> StatusRenderer {
        StatusRenderer::new(HIDE, Arc::new(TokioTimer))
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_hides_after_delay() {
        let form = FakeForm::new(FormKind::Waitlist);
        renderer().show(&form, "Welcome!", MessageKind::Success);
        assert_eq!(form.status(), Some(("Welcome!".to_string(), MessageKind::Success)));
        assert!(form.status_visible());

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(form.status_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!form.status_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stays_visible() {
        let form = FakeForm::new(FormKind::Contact);
        renderer().show(&form, "Nope", MessageKind::Error);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(form.status_visible());
        assert_eq!(form.status(), Some(("Nope".to_string(), MessageKind::Error)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reshow_restarts_visibility() {
        let form = FakeForm::new(FormKind::Waitlist);
        let renderer = renderer();

        renderer.show(&form, "first", MessageKind::Success);
        tokio::time::sleep(Duration::from_millis(3000)).await;
        renderer.show(&form, "second", MessageKind::Success);

        // The first timer fires here but is stale.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(form.status_visible());
        assert_eq!(form.status().unwrap().0, "second");

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert!(!form.status_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_after_success_is_not_hidden_by_old_timer() {
        let form = FakeForm::new(FormKind::Waitlist);
        let renderer = renderer();

        renderer.show(&form, "ok", MessageKind::Success);
        renderer.show(&form, "broken", MessageKind::Error);

        tokio::time::sleep(Duration::from_millis(6000)).await;
        assert!(form.status_visible());
        assert_eq!(form.status().unwrap().1, MessageKind::Error);
    }
}
