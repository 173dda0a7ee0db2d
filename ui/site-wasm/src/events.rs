//! Event listener plumbing.
//!
//! Listeners live as long as the page, so closures are leaked with
//! `forget()` after registration. Async handlers are spawned via
//! `wasm_bindgen_futures::spawn_local`.

use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

/// Attach `handler` for `event` on `target`. The event is downcast to `E`;
/// events of another type are dropped.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Click handler that ignores the event object.
pub fn on_click<F>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(target, "click", move |_: web_sys::Event| handler())
}

/// Run `fut` on the browser's microtask queue.
pub fn spawn<F>(fut: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(fut);
}
