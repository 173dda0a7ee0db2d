//! Slideshow binding: `.slideshow-img` with `.prev` / `.next` buttons and a
//! fixed auto-advance interval.

use crate::browser::ImgProbe;
use crate::dom;
use crate::events;
use dsm_site_core::SiteConfig;
use dsm_site_core::slideshow::{FADE_MS, Slideshow};
use dsm_site_core::timer::millis_u32;
use gloo_timers::callback::{Interval, Timeout};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

struct Player {
    img: HtmlImageElement,
    show: Slideshow,
}

impl Player {
    async fn show_index(self: Rc<Self>, index: usize) {
        dom::remove_class(&self.img, "show");
        let Some(index) = self.show.first_available(index, &ImgProbe).await else {
            return;
        };
        let player = Rc::clone(&self);
        let _ = Timeout::new(FADE_MS, move || {
            if let Some(url) = player.show.url(index) {
                player.img.set_src(url);
            }
            dom::add_class(&player.img, "show");
            player.show.set_current(index);
        })
        .forget();
    }

    fn go(self: &Rc<Self>, index: usize) {
        events::spawn(Rc::clone(self).show_index(index));
    }
}

pub fn bind(cfg: &SiteConfig) -> Result<(), JsValue> {
    let Some(img) = dom::query_typed::<HtmlImageElement>(".slideshow-img") else {
        return Ok(());
    };
    let player = Rc::new(Player {
        img,
        show: Slideshow::new(cfg.slides.clone()),
    });
    if player.show.is_empty() {
        return Ok(());
    }

    if let Some(prev) = dom::query(".prev") {
        let p = Rc::clone(&player);
        events::on_click(&prev, move || p.go(p.show.prev_index()))?;
    }
    if let Some(next) = dom::query(".next") {
        let p = Rc::clone(&player);
        events::on_click(&next, move || p.go(p.show.next_index()))?;
    }

    let p = Rc::clone(&player);
    let _ = Interval::new(millis_u32(cfg.slide_interval()), move || {
        p.go(p.show.next_index())
    })
    .forget();

    player.go(player.show.current());
    Ok(())
}
