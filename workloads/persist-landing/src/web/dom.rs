//! `web-sys` view of the two forms.

use landing_core::FormKind;
use landing_forms::{Field, FormScope, MessageKind, STATUS_REGION_SELECTOR, SUBMIT_BUTTON_SELECTOR};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use crate::page::{check_elements, MountError, PageDocument, SubmitHandler};

/// A mounted form and the elements the controller writes to.
#[derive(Debug, Clone)]
pub struct DomForm {
    form: HtmlFormElement,
    button: HtmlButtonElement,
    status: HtmlElement,
}

impl DomForm {
    fn control(&self, field: Field) -> Option<Element> {
        self.form.query_selector(field.selector()).ok().flatten()
    }
}

impl FormScope for DomForm {
    fn value(&self, field: Field) -> String {
        let Some(control) = self.control(field) else {
            return String::new();
        };

        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn checked(&self, field: Field) -> bool {
        self.control(field)
            .and_then(|control| control.dyn_into::<HtmlInputElement>().ok())
            .is_some_and(|input| input.checked())
    }

    fn show_status(&self, text: &str, kind: MessageKind) {
        self.status.set_text_content(Some(text));
        self.status
            .set_class_name(&format!("form-message {}", kind.css_class()));
        let _ = self.status.style().set_property("display", "block");
    }

    fn hide_status(&self) {
        let _ = self.status.style().set_property("display", "none");
    }

    fn set_loading(&self, loading: bool) {
        let _ = self.button.class_list().toggle_with_force("loading", loading);
        self.button.set_disabled(loading);
    }

    fn reset(&self) {
        self.form.reset();
    }
}

/// The live page.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn find_in<T: JsCast>(
    form: &HtmlFormElement,
    form_id: &'static str,
    selector: &'static str,
) -> Result<T, MountError> {
    form.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or(MountError::MissingElement { form_id, selector })
}

impl PageDocument for BrowserDocument {
    type Form = DomForm;

    fn find_form(&self, kind: FormKind) -> Result<DomForm, MountError> {
        let form_id = kind.form_id();
        let form = self
            .document
            .get_element_by_id(form_id)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
            .ok_or(MountError::MissingForm { form_id })?;

        check_elements(kind, |selector| {
            form.query_selector(selector).ok().flatten().is_some()
        })?;

        Ok(DomForm {
            button: find_in(&form, form_id, SUBMIT_BUTTON_SELECTOR)?,
            status: find_in(&form, form_id, STATUS_REGION_SELECTOR)?,
            form,
        })
    }

    fn on_submit(&self, form: &DomForm, handler: SubmitHandler) -> Result<(), MountError> {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            wasm_bindgen_futures::spawn_local(handler());
        }) as Box<dyn FnMut(_)>);

        form.form
            .add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
            .map_err(|err| MountError::Listener(format!("{:?}", err)))?;

        // Listeners live as long as the page.
        closure.forget();
        Ok(())
    }
}
