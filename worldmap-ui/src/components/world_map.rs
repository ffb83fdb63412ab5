use super::{HoveredCountry, Tooltip};
use crate::hooks::ZoomGesture;
use leptos::*;
use web_sys::MouseEvent;
use worldmap_core::{CountryPath, RenderedPaths, ViewBox};

fn hover_info(country: &CountryPath, ev: &MouseEvent) -> HoveredCountry {
    HoveredCountry {
        id: country.id.clone(),
        name: country.name.clone(),
        page_x: f64::from(ev.page_x()),
        page_y: f64::from(ev.page_y()),
    }
}

/// The map itself: sphere, graticule and countries in one SVG whose
/// `viewBox` follows the displayed view.
///
/// The hovered country is drawn a second time after all others so its full
/// outline sits on top.
#[component]
pub fn WorldMapSvg(
    paths: ReadSignal<RenderedPaths>,
    viewbox: ReadSignal<ViewBox>,
    gesture: ZoomGesture,
    width: f64,
    height: f64,
) -> impl IntoView {
    let hovered = create_rw_signal(None::<HoveredCountry>);
    let dragging = gesture.is_dragging();

    let raised = move || {
        let id = hovered.with(|h| h.as_ref().map(|country| country.id.clone()))?;
        paths.with(|p| {
            p.countries
                .iter()
                .find(|country| country.id == id)
                .map(|country| country.d.clone())
        })
    };

    let countries = move || {
        paths.with(|p| {
            p.countries
                .iter()
                .map(|country| {
                    let on_move = country.clone();
                    view! {
                        <path
                            class="country"
                            d=country.d.clone()
                            on:mousemove=move |ev| hovered.set(Some(hover_info(&on_move, &ev)))
                            on:mouseleave=move |_| hovered.set(None)
                        />
                    }
                })
                .collect_view()
        })
    };

    let graticule = move || {
        paths.with(|p| {
            p.graticule
                .iter()
                .map(|d| view! { <path class="graticule" d=d.clone() /> })
                .collect_view()
        })
    };

    view! {
        <svg
            class="world-map"
            class:dragging=move || dragging.get()
            width=width
            height=height
            viewBox=move || viewbox.get().to_string()
            on:wheel:undelegated=move |ev| gesture.on_wheel(ev)
            on:dblclick:undelegated=move |ev| gesture.on_double_click(ev)
            on:pointerdown:undelegated=move |ev| gesture.on_pointer_down(ev)
            on:pointermove:undelegated=move |ev| gesture.on_pointer_move(ev)
            on:pointerup:undelegated=move |ev| gesture.on_pointer_up(ev)
            on:pointercancel:undelegated=move |ev| gesture.on_pointer_up(ev)
        >
            <path class="sphere" d=move || paths.with(|p| p.sphere.clone()) />
            <g class="graticule-lines">{graticule}</g>
            <g class="countries">{countries}</g>
            {move || raised().map(|d| view! { <path class="country hovered" d=d /> })}
        </svg>
        <Tooltip hovered=hovered.into() />
    }
}

#[cfg(test)]
mod browser_tests {
    use super::*;
    use crate::hooks::{use_viewbox_transition, use_world_map, use_zoom_gesture};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use worldmap_core::MapConfig;

    wasm_bindgen_test_configure!(run_in_browser);

    fn host() -> web_sys::HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document
            .create_element("div")
            .unwrap()
            .unchecked_into::<web_sys::HtmlElement>();
        document.body().unwrap().append_child(&host).unwrap();
        host
    }

    #[wasm_bindgen_test]
    fn renders_sphere_inside_the_initial_viewbox() {
        let host = host();
        mount_to(host.clone(), || {
            let state = use_world_map(MapConfig::default());
            let animation = use_viewbox_transition(state.target.get_untracked(), 250.0);
            let gesture = use_zoom_gesture(state, animation);
            view! {
                <WorldMapSvg
                    paths=state.paths
                    viewbox=animation.displayed
                    gesture=gesture
                    width=960.0
                    height=500.0
                />
            }
        });

        let svg = host.query_selector("svg.world-map").unwrap().unwrap();
        assert_eq!(svg.get_attribute("viewBox").as_deref(), Some("0 0 960 500"));
        let sphere = host.query_selector("path.sphere").unwrap().unwrap();
        assert!(sphere.get_attribute("d").is_some_and(|d| d.starts_with('M')));
        assert_eq!(host.query_selector_all("path.country").unwrap().length(), 0);
        assert!(host.query_selector(".tooltip").unwrap().is_none());
    }
}
