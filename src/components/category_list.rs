//! Category List View

use admin_api::CollectionKind;
use leptos::prelude::*;

use crate::components::SortableList;
use crate::store::{store_select_category, store_set_tab, use_console_store, ConsoleStateStoreFields, ConsoleTab};

#[component]
pub fn CategoryList() -> impl IntoView {
    let store = use_console_store();

    // Picking a category jumps straight to its workouts
    let on_select = Callback::new(move |category_id: u64| {
        store_select_category(&store, Some(category_id));
        store_set_tab(&store, ConsoleTab::Workouts);
    });

    view! {
        <section class="catalog-view">
            <h2>"Categories"</h2>
            <p class="view-hint">"Drag a category to change its position. Click one to manage its workouts."</p>
            <SortableList
                kind=CollectionKind::Categories
                context_id=Signal::stored(None)
                selected=Signal::derive(move || store.selected_category().get())
                on_select=on_select
                empty_text="No categories yet."
            />
        </section>
    }
}
