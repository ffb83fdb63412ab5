use crate::components::{PanControls, ProjectionSelect, RotateButton, WorldMapSvg};
use crate::hooks::{
    use_keyboard, use_rotation, use_viewbox_transition, use_world_map, use_zoom_gesture,
};
use crate::rendering::{describe_js_error, fetch_text};
use leptos::*;
use worldmap_core::{MapConfig, PanDirection};

#[component]
pub fn App() -> impl IntoView {
    // ========== Map session ==========
    let config = MapConfig::default();
    let (width, height) = (config.width, config.height);
    let transition_ms = config.transition_ms;
    let topology_url = config.topology_url.clone();

    let state = use_world_map(config);
    let animation = use_viewbox_transition(state.target.get_untracked(), transition_ms);
    let rotation = use_rotation(state);
    let gesture = use_zoom_gesture(state, animation);
    let (load_error, set_load_error) = create_signal(None::<String>);

    // ========== Topology: fetched once, no retry ==========
    spawn_local(async move {
        let result = match fetch_text(&topology_url).await {
            Ok(json) => state.load_topology(&json).map_err(|e| e.to_string()),
            Err(err) => Err(describe_js_error(&err)),
        };
        if let Err(message) = result {
            log::error!("failed to load {topology_url}: {message}");
            set_load_error.set(Some(format!("Could not load map data: {message}")));
        }
    });

    // ========== Discrete view changes are animated ==========
    use_keyboard(move |key| match state.key(key) {
        Some(viewbox) => {
            animation.animate_to(viewbox);
            true
        }
        None => false,
    });

    let on_pan = Callback::new(move |direction: PanDirection| {
        if let Some(viewbox) = state.pan(direction) {
            animation.animate_to(viewbox);
        }
    });
    let on_reset = Callback::new(move |_: ()| {
        if let Some(viewbox) = state.reset() {
            animation.animate_to(viewbox);
        }
    });
    let on_zoom_in = Callback::new(move |_: ()| {
        if let Some(viewbox) = state.zoom_in() {
            animation.animate_to(viewbox);
        }
    });
    let on_zoom_out = Callback::new(move |_: ()| {
        if let Some(viewbox) = state.zoom_out() {
            animation.animate_to(viewbox);
        }
    });

    // ========== Projection and rotation ==========
    let on_select = Callback::new(move |name: String| {
        // Unknown names are logged by the map and leave it unchanged
        let _ = state.set_projection_by_name(&name);
    });
    let on_toggle = Callback::new(move |_: ()| rotation.toggle());

    view! {
        <main class="app">
            <header class="toolbar">
                <ProjectionSelect current=state.projection on_select=on_select />
                <RotateButton
                    projection=state.projection
                    rotating=state.rotating
                    on_toggle=on_toggle
                />
            </header>
            <WorldMapSvg
                paths=state.paths
                viewbox=animation.displayed
                gesture=gesture
                width=width
                height=height
            />
            <PanControls
                on_pan=on_pan
                on_reset=on_reset
                on_zoom_in=on_zoom_in
                on_zoom_out=on_zoom_out
            />
            {move || load_error.get().map(|message| view! { <p class="load-error">{message}</p> })}
        </main>
    }
}
