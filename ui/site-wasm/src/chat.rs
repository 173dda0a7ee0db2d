//! WhatsApp chat bubble.

use crate::dom;
use crate::events;
use dsm_site_core::SiteConfig;
use dsm_site_core::chat::{compose_message, whatsapp_link};
use gloo_utils::{document, window};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlInputElement};

fn send(
    body: &Element,
    input: &HtmlInputElement,
    phone: &str,
    default_message: &str,
) -> Result<(), JsValue> {
    let text = compose_message(&input.value(), default_message);

    let bubble = document().create_element("div")?;
    bubble.set_class_name("message user");
    bubble.set_text_content(Some(&text));
    body.append_child(&bubble)?;
    dom::scroll_to_bottom(body);

    let encoded: String = js_sys::encode_uri_component(&text).into();
    window().open_with_url_and_target(&whatsapp_link(phone, &encoded), "_blank")?;

    input.set_value("");
    dom::scroll_to_bottom(body);
    Ok(())
}

pub fn bind(cfg: &SiteConfig) -> Result<(), JsValue> {
    let (Some(chat_window), Some(body)) = (dom::by_id("chatWindow"), dom::by_id("chatBody")) else {
        return Ok(());
    };

    if let Some(bubble) = dom::by_id("chatBubble") {
        let (win, body) = (chat_window.clone(), body.clone());
        events::on_click(&bubble, move || {
            dom::set_style(&win, "display", "flex");
            dom::scroll_to_bottom(&body);
        })?;
    }

    if let Some(close) = dom::by_id("closeChat") {
        let win = chat_window.clone();
        events::on_click(&close, move || dom::set_style(&win, "display", "none"))?;
    }

    if let (Some(send_btn), Some(input)) = (
        dom::by_id("sendMessage"),
        dom::by_id_typed::<HtmlInputElement>("userMessage"),
    ) {
        let phone = cfg.whatsapp_phone.clone();
        let default_message = cfg.whatsapp_default_message.clone();
        events::on_click(&send_btn, move || {
            if let Err(e) = send(&body, &input, &phone, &default_message) {
                tracing::warn!(error = ?e, "could not open WhatsApp chat");
            }
        })?;
    }
    Ok(())
}
