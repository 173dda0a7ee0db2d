//! Browser implementations of the core time, storage and probe seams.

use async_trait::async_trait;
use dsm_site_core::slideshow::ImageProbe;
use dsm_site_core::timer::millis_u32;
use dsm_site_core::{Clock, DraftError, KeyValueStore, Scheduler};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// `setTimeout`-backed scheduler. Dropping a `Timeout` clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis_u32(delay), task)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// `window.localStorage`, raw strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DraftError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| DraftError::Store(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// `onload` / `onerror` handlers on an `<img>`, each resolving the pending
/// load result. Only one of them ever fires; dropping the pair detaches and
/// frees both.
struct LoadListeners {
    img: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl LoadListeners {
    fn attach(img: &HtmlImageElement, resolve: js_sys::Function) -> Self {
        let on_error = resolve.clone();
        let onload = Closure::once(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        let onerror = Closure::once(move || {
            let _ = on_error.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        Self {
            img: img.clone(),
            _onload: onload,
            _onerror: onerror,
        }
    }
}

impl Drop for LoadListeners {
    fn drop(&mut self) {
        self.img.set_onload(None);
        self.img.set_onerror(None);
    }
}

/// Checks an image URL by loading it into a detached `<img>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImgProbe;

#[async_trait(?Send)]
impl ImageProbe for ImgProbe {
    async fn exists(&self, url: &str) -> bool {
        let Ok(img) = HtmlImageElement::new() else {
            return false;
        };
        let mut listeners = None;
        let loaded = js_sys::Promise::new(&mut |resolve, _reject| {
            listeners = Some(LoadListeners::attach(&img, resolve));
        });
        img.set_src(url);
        let found = JsFuture::from(loaded)
            .await
            .map(|v| v.is_truthy())
            .unwrap_or(false);
        drop(listeners);
        found
    }
}
