//! Reveal-on-scroll binding via `IntersectionObserver`.

use crate::dom;
use dsm_site_core::reveal::{
    self, Animation, OBSERVED_SELECTOR, RevealPlan, RevealTarget, THRESHOLD,
};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

fn classify(el: &Element) -> RevealTarget {
    match el.id().as_str() {
        "cards-container" => RevealTarget::CardsContainer,
        "avisos-container" => RevealTarget::AvisosContainer,
        _ if el.closest("#maps-container").ok().flatten().is_some() => RevealTarget::MapItem {
            delay: el.get_attribute("data-delay"),
        },
        _ => RevealTarget::Classed {
            fade_in_up: dom::has_class(el, "fade-in-up"),
            slide_left: dom::has_class(el, "slide-left"),
            slide_right: dom::has_class(el, "slide-right"),
        },
    }
}

fn apply(el: &Element, animation: &Animation) {
    dom::set_style(el, "animation", animation.animation);
    if let Some(delay) = &animation.delay {
        dom::set_style(el, "animation-delay", delay);
    }
}

fn reveal(el: &Element) {
    let target = classify(el);
    let children = target
        .child_selector()
        .map(|sel| dom::query_all_within(el, sel))
        .unwrap_or_default();
    match reveal::plan(&target, children.len()) {
        RevealPlan::Children(animations) => {
            for (child, animation) in children.iter().zip(&animations) {
                apply(child, animation);
            }
        }
        RevealPlan::Target(animation) => apply(el, &animation),
        RevealPlan::Nothing => {}
    }
}

pub fn bind() -> Result<(), JsValue> {
    let targets = dom::query_all(OBSERVED_SELECTOR);
    if targets.is_empty() {
        return Ok(());
    }

    let cb = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            reveal(&target);
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(THRESHOLD));
    let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &opts)?;
    cb.forget();

    for el in &targets {
        observer.observe(el);
    }
    Ok(())
}
