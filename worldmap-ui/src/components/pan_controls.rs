use leptos::*;
use worldmap_core::PanDirection;

fn arrow(direction: PanDirection) -> &'static str {
    match direction {
        PanDirection::Up => "↑",
        PanDirection::Down => "↓",
        PanDirection::Left => "←",
        PanDirection::Right => "→",
    }
}

#[component]
pub fn PanControls(
    on_pan: Callback<PanDirection>,
    on_reset: Callback<()>,
    on_zoom_in: Callback<()>,
    on_zoom_out: Callback<()>,
) -> impl IntoView {
    let pan_button = move |direction: PanDirection| {
        view! {
            <button
                class=format!("pan pan-{}", format!("{direction:?}").to_lowercase())
                title=format!("Pan {direction:?}")
                on:click=move |_| on_pan.call(direction)
            >
                {arrow(direction)}
            </button>
        }
    };

    view! {
        <div class="pan-controls">
            {pan_button(PanDirection::Up)}
            <div class="pan-row">
                {pan_button(PanDirection::Left)}
                <button class="reset" title="Reset view" on:click=move |_| on_reset.call(())>
                    "Reset"
                </button>
                {pan_button(PanDirection::Right)}
            </div>
            {pan_button(PanDirection::Down)}
            <div class="zoom-row">
                <button class="zoom-in" title="Zoom in" on:click=move |_| on_zoom_in.call(())>
                    "+"
                </button>
                <button class="zoom-out" title="Zoom out" on:click=move |_| on_zoom_out.call(())>
                    "−"
                </button>
            </div>
        </div>
    }
}
