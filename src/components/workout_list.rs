//! Workout List View
//!
//! Workouts of the selected category, reorderable within that category.

use admin_api::CollectionKind;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{ContextPicker, SortableList};
use crate::context::use_console_context;
use crate::models::sorted_rows;
use crate::store::{store_select_category, store_select_workout, store_set_tab, ConsoleStateStoreFields, ConsoleTab};

#[component]
pub fn WorkoutList() -> impl IntoView {
    let ctx = use_console_context();
    let store = ctx.store();
    let categories = RwSignal::new(Vec::<(u64, String)>::new());

    Effect::new(move |_| {
        let _ = ctx.refresh_version();
        spawn_local(async move {
            match commands::list_categories(&ctx.config()).await {
                Ok(list) => {
                    categories.try_set(
                        sorted_rows(list).into_iter().map(|row| (row.id, row.title)).collect(),
                    );
                }
                Err(failure) => ctx.report_fetch_error("categories", &failure),
            }
        });
    });

    let selected_category = Signal::derive(move || store.selected_category().get());
    let on_select = Callback::new(move |workout_id: u64| {
        store_select_workout(&store, Some(workout_id));
        store_set_tab(&store, ConsoleTab::Videos);
    });

    view! {
        <section class="catalog-view">
            <h2>"Workouts"</h2>
            <ContextPicker
                label="Category"
                options=categories
                selected=selected_category
                on_change=Callback::new(move |category_id| store_select_category(&store, category_id))
            />
            <SortableList
                kind=CollectionKind::Workouts
                context_id=selected_category
                selected=Signal::derive(move || store.selected_workout().get())
                on_select=on_select
                empty_text="No workouts to show. Pick a category above."
            />
        </section>
    }
}
