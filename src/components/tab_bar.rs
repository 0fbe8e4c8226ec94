//! Tab Bar Component
//!
//! Switches between the console's views.

use leptos::prelude::*;

use crate::store::{store_set_tab, use_console_store, ConsoleStateStoreFields, ConsoleTab};

#[component]
pub fn TabBar() -> impl IntoView {
    let store = use_console_store();

    view! {
        <nav class="tab-bar">
            {ConsoleTab::ALL
                .into_iter()
                .map(|tab| {
                    let is_active = move || store.active_tab().get() == tab;
                    let tab_class = move || if is_active() { "console-tab active" } else { "console-tab" };
                    view! {
                        <button class=tab_class on:click=move |_| store_set_tab(&store, tab)>
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
