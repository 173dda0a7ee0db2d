//! Flip-card binding.
//!
//! Each `.flip-card` holds a `.flip-card-inner` that carries the `flipped`
//! class. Cards without an inner element are skipped.

use crate::browser::BrowserScheduler;
use crate::dom;
use crate::events;
use dsm_site_core::{CardId, CardView, FlipCards};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

const FLIPPED: &str = "flipped";

/// Inner card elements, indexed by `CardId`.
pub struct CardFaces {
    inners: Vec<Element>,
}

impl CardView for CardFaces {
    fn set_flipped(&self, card: CardId, flipped: bool) {
        if let Some(inner) = self.inners.get(card) {
            if flipped {
                dom::add_class(inner, FLIPPED);
            } else {
                dom::remove_class(inner, FLIPPED);
            }
        }
    }
}

pub fn bind(dwell: Duration) -> Result<(), JsValue> {
    let mut cards = Vec::new();
    let mut inners = Vec::new();
    for card in dom::query_all(".flip-card") {
        if let Some(inner) = card.query_selector(".flip-card-inner").ok().flatten() {
            cards.push(card);
            inners.push(inner);
        }
    }
    if cards.is_empty() {
        return Ok(());
    }

    let controller = FlipCards::new(cards.len(), dwell, BrowserScheduler, CardFaces { inners });

    for (id, card) in cards.iter().enumerate() {
        let on_click = controller.clone();
        events::on_click(card, move || on_click.activate(id))?;

        let on_key = controller.clone();
        events::listen(card, "keydown", move |e: KeyboardEvent| {
            let key = e.key();
            if key == "Enter" || key == " " {
                e.prevent_default();
                on_key.activate(id);
            }
        })?;
    }
    tracing::debug!(count = cards.len(), "flip cards bound");
    Ok(())
}
