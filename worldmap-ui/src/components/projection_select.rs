use leptos::*;
use worldmap_core::ProjectionKind;

/// Dropdown of every projection, labelled by display name.
#[component]
pub fn ProjectionSelect(
    current: ReadSignal<ProjectionKind>,
    /// Receives the selected option's label
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="projection-select"
            on:change=move |ev| on_select.call(event_target_value(&ev))
        >
            {ProjectionKind::ALL
                .iter()
                .map(|&kind| {
                    view! {
                        <option
                            value=kind.display_name()
                            selected=move || current.get() == kind
                        >
                            {kind.display_name()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
