use leptos::*;
use worldmap_core::ProjectionKind;

/// Start/stop toggle, shown only while the projection can rotate.
#[component]
pub fn RotateButton(
    projection: ReadSignal<ProjectionKind>,
    rotating: ReadSignal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || projection.get().is_rotatable()>
            <button class="rotate" on:click=move |_| on_toggle.call(())>
                {move || if rotating.get() { "Stop Rotating" } else { "Start Rotating" }}
            </button>
        </Show>
    }
}
