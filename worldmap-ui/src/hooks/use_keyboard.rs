use leptos::*;
use leptos_use::{use_event_listener, use_window};
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

/// Route window keydown events to `handle`, which reports whether the key
/// was bound. Bound keys have their default action suppressed.
///
/// Keys pressed with a modifier, or while a dropdown has focus, are left to
/// the browser.
pub fn use_keyboard(handle: impl Fn(&str) -> bool + 'static) {
    let _ = use_event_listener(use_window(), ev::keydown, move |ev| {
        if ev.alt_key() || ev.ctrl_key() || ev.meta_key() {
            return;
        }
        let on_select = ev
            .target()
            .is_some_and(|target| target.has_type::<HtmlSelectElement>());
        if on_select {
            return;
        }
        if handle(&ev.key()) {
            ev.prevent_default();
        }
    });
}
