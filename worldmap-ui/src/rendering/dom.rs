use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

/// Current time in milliseconds, on the same clock as animation frames.
pub fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Pointer position relative to the element the listener is attached to.
pub fn pointer_position(ev: &MouseEvent) -> Option<(f64, f64)> {
    let element = ev.current_target()?.dyn_into::<Element>().ok()?;
    let rect = element.get_bounding_client_rect();
    Some((
        f64::from(ev.client_x()) - rect.left(),
        f64::from(ev.client_y()) - rect.top(),
    ))
}
