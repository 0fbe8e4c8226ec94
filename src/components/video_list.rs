//! Video List View
//!
//! Videos of the selected workout, reorderable within that workout.

use admin_api::CollectionKind;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{ContextPicker, SortableList};
use crate::context::use_console_context;
use crate::models::sorted_rows;
use crate::store::{store_select_workout, ConsoleStateStoreFields};

#[component]
pub fn VideoList() -> impl IntoView {
    let ctx = use_console_context();
    let store = ctx.store();
    let workouts = RwSignal::new(Vec::<(u64, String)>::new());
    let selected_category = Signal::derive(move || store.selected_category().get());

    // Workout choices follow the category picked on the Workouts tab
    Effect::new(move |_| {
        let _ = ctx.refresh_version();
        let Some(category_id) = selected_category.get() else {
            workouts.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match commands::list_workouts(&ctx.config(), category_id).await {
                Ok(list) => {
                    workouts.try_set(
                        sorted_rows(list).into_iter().map(|row| (row.id, row.title)).collect(),
                    );
                }
                Err(failure) => ctx.report_fetch_error("workouts", &failure),
            }
        });
    });

    view! {
        <section class="catalog-view">
            <h2>"Videos"</h2>
            <Show
                when=move || selected_category.get().is_some()
                fallback=|| view! {
                    <p class="view-hint">"Pick a category on the Workouts tab first."</p>
                }
            >
                <ContextPicker
                    label="Workout"
                    options=workouts
                    selected=Signal::derive(move || store.selected_workout().get())
                    on_change=Callback::new(move |workout_id| store_select_workout(&store, workout_id))
                />
            </Show>
            <SortableList
                kind=CollectionKind::Videos
                context_id=Signal::derive(move || store.selected_workout().get())
                empty_text="No videos to show. Pick a workout above."
            />
        </section>
    }
}
