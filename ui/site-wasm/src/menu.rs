//! Mobile menu binding.

use crate::dom;
use crate::events;
use dsm_site_core::menu::{FADE_IN_DELAY_MS, FADE_OUT_MS, MenuState};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

struct Menu {
    panel: Element,
    icon: Element,
}

impl Menu {
    fn state(&self) -> MenuState {
        MenuState::from_hidden(dom::has_class(&self.panel, "hidden"))
    }

    fn open(&self) {
        dom::remove_class(&self.panel, "hidden");
        let panel = self.panel.clone();
        let _ = Timeout::new(FADE_IN_DELAY_MS, move || {
            dom::remove_class(&panel, "opacity-0")
        })
        .forget();
        let _ = self.icon.set_attribute("d", MenuState::Open.icon_path());
    }

    fn close(&self) {
        dom::add_class(&self.panel, "opacity-0");
        let panel = self.panel.clone();
        let icon = self.icon.clone();
        let _ = Timeout::new(FADE_OUT_MS, move || {
            dom::add_class(&panel, "hidden");
            let _ = icon.set_attribute("d", MenuState::Closed.icon_path());
        })
        .forget();
    }

    fn toggle(&self) {
        match self.state().toggled() {
            MenuState::Open => self.open(),
            MenuState::Closed => self.close(),
        }
    }
}

pub fn bind() -> Result<(), JsValue> {
    let (Some(button), Some(panel), Some(icon)) = (
        dom::by_id("menu-btn"),
        dom::by_id("mobile-menu"),
        dom::query("#icon-menu path"),
    ) else {
        return Ok(());
    };
    let menu = Rc::new(Menu { panel, icon });

    let on_button = Rc::clone(&menu);
    events::on_click(&button, move || on_button.toggle())?;

    for link in dom::query_all(".menu-link") {
        let on_link = Rc::clone(&menu);
        events::on_click(&link, move || on_link.close())?;
    }
    Ok(())
}
