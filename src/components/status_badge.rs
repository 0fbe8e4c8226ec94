//! Status Badge Component

use leptos::prelude::*;
use optimistic_sync::ScheduleStatus;

#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<ScheduleStatus>) -> impl IntoView {
    view! {
        <span class=move || status.get().tone().css_class()>
            {move || status.get().label()}
        </span>
    }
}
