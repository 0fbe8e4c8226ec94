//! Context Picker Component
//!
//! Drop-down choosing the collection a nested list belongs to.

use leptos::prelude::*;

#[component]
pub fn ContextPicker(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(u64, String)>>,
    #[prop(into)] selected: Signal<Option<u64>>,
    on_change: Callback<Option<u64>>,
) -> impl IntoView {
    view! {
        <label class="context-picker">
            <span class="context-picker-label">{label}</span>
            <select
                prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                on:change=move |ev| on_change.run(event_target_value(&ev).parse::<u64>().ok())
            >
                <option value="">"Choose..."</option>
                <For
                    each=move || options.get()
                    key=|(id, name)| (*id, name.clone())
                    children=move |(id, name)| {
                        view! {
                            <option value=id.to_string() selected=move || selected.get() == Some(id)>
                                {name}
                            </option>
                        }
                    }
                />
            </select>
        </label>
    }
}
