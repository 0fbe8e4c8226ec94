//! Status Toggle Component
//!
//! On/off switch for a schedule status.

use leptos::prelude::*;
use optimistic_sync::{ScheduleStatus, ToggleStatus};

#[component]
pub fn StatusToggle(
    #[prop(into)] status: Signal<ScheduleStatus>,
    #[prop(into)] disabled: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let is_on = move || status.get().is_on();

    view! {
        <button
            type="button"
            role="switch"
            class=move || if is_on() { "status-switch on" } else { "status-switch" }
            aria-checked=move || is_on().to_string()
            title=move || status.get().label()
            disabled=move || disabled.get()
            on:click=move |_| on_toggle.run(())
        >
            <span class="status-switch-knob"></span>
        </button>
    }
}
