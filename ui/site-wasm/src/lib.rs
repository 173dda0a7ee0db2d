//! DSM parents' site frontend.
//!
//! Rust + WASM replacement for the site's page script. Each widget binds
//! itself only when its elements are present, so one module serves every
//! page. State machines come from `dsm-site-core`.

pub mod api;
pub mod browser;
pub mod cards;
pub mod chat;
pub mod config;
pub mod contact;
pub mod dom;
pub mod embed;
pub mod events;
pub mod logging;
pub mod menu;
pub mod reveal;
pub mod slideshow;

use gloo_utils::window;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let loaded = config::load();
    let cfg = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&cfg.log_level);
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "ignoring invalid #{}", config::CONFIG_ELEMENT_ID);
    }

    menu::bind()?;
    cards::bind(cfg.flip_dwell())?;
    contact::bind(&cfg)?;
    reveal::bind()?;
    slideshow::bind(&cfg)?;
    chat::bind(&cfg)?;
    events::spawn(embed::probe_and_embed(cfg.embed_url.clone()));

    events::listen(&window(), "beforeunload", |_: web_sys::Event| {
        window().scroll_to_with_x_and_y(0.0, 0.0);
    })?;

    tracing::info!("site script ready");
    Ok(())
}
