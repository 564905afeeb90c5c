//! Page-init wiring: attach a submit handler to every form the page has.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use landing_core::FormKind;
use landing_forms::{
    Field, FormScope, FormSubmissionController, STATUS_REGION_SELECTOR, SUBMIT_BUTTON_SELECTOR,
};
use thiserror::Error;

/// Called on each submit event. The returned future runs one attempt.
pub type SubmitHandler = Box<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Why a form could not be mounted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// The page has no such form.
    #[error("form #{form_id} not found")]
    MissingForm { form_id: &'static str },

    /// The form lacks an element the controller writes to.
    #[error("form #{form_id} has no element matching `{selector}`")]
    MissingElement {
        form_id: &'static str,
        selector: &'static str,
    },

    /// The host refused the event listener.
    #[error("failed to attach submit listener: {0}")]
    Listener(String),
}

/// A page the forms can be looked up in.
pub trait PageDocument {
    type Form: FormScope;

    /// Look up a form and the elements inside it the controller needs.
    fn find_form(&self, kind: FormKind) -> Result<Self::Form, MountError>;

    /// Run `handler` on every submit of `form`, suppressing the default
    /// navigation.
    fn on_submit(&self, form: &Self::Form, handler: SubmitHandler) -> Result<(), MountError>;
}

/// Selectors a form of `kind` must contain before it can be mounted: the
/// submit button, the status region, then every control the form reads.
pub fn required_selectors(kind: FormKind) -> impl Iterator<Item = &'static str> {
    [SUBMIT_BUTTON_SELECTOR, STATUS_REGION_SELECTOR]
        .into_iter()
        .chain(Field::for_form(kind).iter().map(Field::selector))
}

/// Fail with the first required selector `has` cannot find.
pub fn check_elements(
    kind: FormKind,
    has: impl Fn(&'static str) -> bool,
) -> Result<(), MountError> {
    match required_selectors(kind).find(|&selector| !has(selector)) {
        Some(selector) => Err(MountError::MissingElement {
            form_id: kind.form_id(),
            selector,
        }),
        None => Ok(()),
    }
}

/// Which forms were wired up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountReport {
    pub mounted: Vec<FormKind>,
    pub skipped: Vec<(FormKind, MountError)>,
}

impl MountReport {
    pub fn is_mounted(&self, kind: FormKind) -> bool {
        self.mounted.contains(&kind)
    }

    /// Every form was mounted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Mount a submit handler on each form present in `document`.
///
/// A form that cannot be mounted is logged and skipped; the other is still
/// mounted.
pub fn mount<D: PageDocument>(document: &D, controller: Rc<FormSubmissionController>) -> MountReport {
    let mut report = MountReport::default();

    for kind in FormKind::ALL {
        let result = document.find_form(kind).and_then(|form| {
            let handler = submit_handler(kind, form.clone(), &controller);
            document.on_submit(&form, handler)
        });

        match result {
            Ok(()) => report.mounted.push(kind),
            Err(err) => {
                controller
                    .logger()
                    .clone()
                    .with_form(kind)
                    .warn_builder("form not mounted")
                    .field("error", err.to_string())
                    .emit();
                report.skipped.push((kind, err));
            }
        }
    }

    report
}

fn submit_handler<F: FormScope>(
    kind: FormKind,
    form: F,
    controller: &Rc<FormSubmissionController>,
) -> SubmitHandler {
    let controller = Rc::clone(controller);
    Box::new(move || {
        let controller = Rc::clone(&controller);
        let form = form.clone();
        Box::pin(async move {
            // The controller renders and logs every outcome itself.
            controller.submit_kind(kind, &form).await;
        })
    })
}
