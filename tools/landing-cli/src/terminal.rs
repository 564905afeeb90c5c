//! A form filled from the command line.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use indicatif::ProgressBar;
use landing_forms::{Field, FormScope, MessageKind};

use crate::output::Output;

#[derive(Default)]
struct State {
    values: HashMap<Field, String>,
    checked: HashMap<Field, bool>,
    spinner: Option<ProgressBar>,
}

/// Form values collected from flags and prompts. The status region prints to
/// the terminal and the loading state is a spinner.
#[derive(Clone)]
pub struct TerminalForm {
    output: Output,
    spinner_message: &'static str,
    state: Arc<Mutex<State>>,
}

impl TerminalForm {
    pub fn new(output: Output, spinner_message: &'static str) -> Self {
        Self {
            output,
            spinner_message,
            state: Arc::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fill a text control. `None` leaves it empty.
    pub fn set(&self, field: Field, value: Option<String>) {
        if let Some(value) = value {
            self.state().values.insert(field, value);
        }
    }

    pub fn set_checked(&self, field: Field, checked: bool) {
        self.state().checked.insert(field, checked);
    }
}

impl FormScope for TerminalForm {
    fn value(&self, field: Field) -> String {
        self.state().values.get(&field).cloned().unwrap_or_default()
    }

    fn checked(&self, field: Field) -> bool {
        self.state().checked.get(&field).copied().unwrap_or(false)
    }

    fn show_status(&self, text: &str, kind: MessageKind) {
        match &self.state().spinner {
            Some(spinner) => spinner.suspend(|| self.output.status(text, kind)),
            None => self.output.status(text, kind),
        }
    }

    // Printed lines cannot be taken back.
    fn hide_status(&self) {}

    fn set_loading(&self, loading: bool) {
        let mut state = self.state();
        if loading {
            if state.spinner.is_none() {
                state.spinner = Some(self.output.spinner(self.spinner_message));
            }
        } else if let Some(spinner) = state.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn reset(&self) {
        let mut state = self.state();
        state.values.clear();
        state.checked.clear();
    }
}
