use leptos::*;

/// Country under the pointer, with the pointer's page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct HoveredCountry {
    pub id: String,
    pub name: String,
    pub page_x: f64,
    pub page_y: f64,
}

#[component]
pub fn Tooltip(hovered: Signal<Option<HoveredCountry>>) -> impl IntoView {
    move || {
        hovered.get().map(|country| {
            let style = format!(
                "left: {}px; top: {}px; opacity: 0.7;",
                country.page_x, country.page_y
            );
            view! {
                <div class="tooltip" style=style>
                    <div class="tooltip-name">{country.name}</div>
                    <div class="tooltip-population">"Population: coming soon"</div>
                </div>
            }
        })
    }
}
