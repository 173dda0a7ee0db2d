//! Contact form (`#formAyuda`).
//!
//! Binds inline email validation, the debounced local draft and submission
//! to the Apps Script endpoint. The draft rules live in
//! `dsm_site_core::draft`; this module only moves values in and out of the
//! DOM.

use crate::api::AppsScriptEndpoint;
use crate::browser::{BrowserClock, BrowserScheduler, LocalStore};
use crate::dom;
use crate::events;
use dsm_site_core::{ContactField, ContactFields, DraftManager, EmailCheck, SiteConfig, check_email};
use gloo_utils::{document, window};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

type Drafts = DraftManager<LocalStore, BrowserScheduler, BrowserClock>;

// ── Form control access ──

fn control(form: &HtmlFormElement, name: &str) -> Option<Element> {
    form.elements().named_item(name)
}

fn control_value(form: &HtmlFormElement, name: &str) -> Option<String> {
    let el = control(form, name)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        el.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
    }
}

fn set_control_value(form: &HtmlFormElement, name: &str, value: &str) {
    let Some(el) = control(form, name) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(text) = el.dyn_ref::<HtmlTextAreaElement>() {
        text.set_value(value);
    }
}

// ── Form controller ──

struct ContactForm {
    form: HtmlFormElement,
    correo: Option<HtmlInputElement>,
    error: Option<Element>,
    loading: Option<Element>,
    drafts: Drafts,
    endpoint: AppsScriptEndpoint,
    thank_you_page: String,
}

impl ContactForm {
    fn fields(&self) -> ContactFields {
        let mut fields = ContactFields::default();
        for field in ContactField::ALL {
            if let Some(value) = control_value(&self.form, field.name()) {
                fields.set(field, value);
            }
        }
        fields
    }

    /// Apply a correo check: custom validity always, the inline error only
    /// when `show_message`.
    fn show_email_check(&self, check: EmailCheck, show_message: bool) {
        if let Some(input) = &self.correo {
            input.set_custom_validity(check.validity_message());
        }
        if show_message {
            if let Some(error) = &self.error {
                if check.shows_error() {
                    dom::remove_class(error, "hidden");
                } else {
                    dom::add_class(error, "hidden");
                }
            }
        }
    }

    fn validate_correo(&self, show_message: bool) -> EmailCheck {
        let check = match &self.correo {
            Some(input) => check_email(&input.value()),
            None => EmailCheck::Empty,
        };
        self.show_email_check(check, show_message);
        check
    }

    fn restore(&self) {
        let Some(draft) = self.drafts.restore() else {
            return;
        };
        for field in ContactField::ALL {
            if let Some(value) = draft.get(field) {
                set_control_value(&self.form, field.name(), value);
            }
        }
        self.validate_correo(false);
    }

    fn on_input(&self, e: &Event) {
        let changed = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.get_attribute("name"))
            .and_then(|name| ContactField::from_name(&name));
        let fields = self.fields();
        if let Some(check) = self.drafts.on_field_input(&fields, changed) {
            self.show_email_check(check, true);
        }
    }

    fn set_loading(&self, on: bool) {
        if let Some(modal) = &self.loading {
            if on {
                dom::remove_class(modal, "hidden");
            } else {
                dom::add_class(modal, "hidden");
            }
        }
        if let Some(body) = document().body() {
            if on {
                dom::add_class(&body, "modal-open");
            } else {
                dom::remove_class(&body, "modal-open");
            }
        }
    }

    fn focus_correo(&self) {
        if let Some(input) = &self.correo {
            let _ = input.focus();
        }
    }

    async fn submit(&self) {
        if !self.validate_correo(true).is_valid() {
            self.focus_correo();
            return;
        }

        self.set_loading(true);
        let fields = self.fields();
        match self.drafts.on_submit(&fields, &self.endpoint).await {
            Ok(()) => {
                if let Err(e) = window().location().set_href(&self.thank_you_page) {
                    tracing::error!(error = ?e, "could not navigate to confirmation page");
                }
            }
            Err(e) => {
                self.set_loading(false);
                match e.alert_text() {
                    Some(text) => {
                        let _ = window().alert_with_message(&text);
                    }
                    None => self.focus_correo(),
                }
            }
        }
    }
}

pub fn bind(cfg: &SiteConfig) -> Result<(), JsValue> {
    let Some(form) = dom::by_id_typed::<HtmlFormElement>("formAyuda") else {
        return Ok(());
    };

    let ctx = Rc::new(ContactForm {
        form,
        correo: dom::by_id_typed::<HtmlInputElement>("correo"),
        error: dom::by_id("errorCorreo"),
        loading: dom::by_id("loadingModal"),
        drafts: DraftManager::new(LocalStore, BrowserScheduler, BrowserClock, cfg.draft_settings()),
        endpoint: AppsScriptEndpoint::new(cfg.endpoint.clone()),
        thank_you_page: cfg.thank_you_page.clone(),
    });

    ctx.restore();

    for event in ["input", "change"] {
        let on_input = Rc::clone(&ctx);
        events::listen(&ctx.form, event, move |e: Event| on_input.on_input(&e))?;
    }

    let on_submit = Rc::clone(&ctx);
    events::listen(&ctx.form, "submit", move |e: Event| {
        e.prevent_default();
        let ctx = Rc::clone(&on_submit);
        events::spawn(async move { ctx.submit().await });
    })?;

    Ok(())
}
