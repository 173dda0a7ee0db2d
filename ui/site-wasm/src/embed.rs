//! Conditional iframe embed: only inserted when the host answers.

use crate::api;
use crate::dom;
use gloo_utils::document;
use wasm_bindgen::prelude::*;
use web_sys::HtmlIFrameElement;

const IFRAME_CLASSES: &str = "w-full h-[50vh] sm:h-[60vh] md:h-[75vh] lg:h-[80vh] border-0";

fn insert_iframe(wrapper: &web_sys::Element, url: &str) -> Result<(), JsValue> {
    let iframe: HtmlIFrameElement = document().create_element("iframe")?.dyn_into()?;
    iframe.set_src(url);
    iframe.set_class_name(IFRAME_CLASSES);
    iframe.set_allow_fullscreen(true);
    wrapper.append_child(&iframe)?;
    Ok(())
}

pub async fn probe_and_embed(url: String) {
    let Some(wrapper) = dom::by_id("iframe-wrapper") else {
        return;
    };
    if api::is_reachable(&url).await {
        if let Err(e) = insert_iframe(&wrapper, &url) {
            tracing::warn!(error = ?e, "could not insert iframe");
        }
    } else {
        tracing::info!(%url, "embed host unreachable");
        if let Some(alert) = dom::by_id("alert-message") {
            dom::set_style(&alert, "display", "block");
        }
    }
}
