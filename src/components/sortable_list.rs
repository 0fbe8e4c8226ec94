//! Sortable List Component
//!
//! One reorderable collection with drag-and-drop support.
//! Each mounted list owns its own reorder engine; a drop is shown at once
//! and undone if the backend refuses it.

use admin_api::CollectionKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use optimistic_sync::{DragEnd, ReorderEngine};
use tracing::{debug, info};

use crate::commands;
use crate::context::use_console_context;
use crate::models::SortableRow;

#[component]
pub fn SortableList(
    kind: CollectionKind,
    /// Owning collection; `None` for top-level lists
    #[prop(into)]
    context_id: Signal<Option<u64>>,
    #[prop(into, optional)] selected: MaybeProp<u64>,
    #[prop(optional)] on_select: Option<Callback<u64>>,
    /// Shown when there is nothing to list
    empty_text: &'static str,
) -> impl IntoView {
    let ctx = use_console_context();
    let policy = ctx.config().reorder_policy;
    let engine = RwSignal::new(ReorderEngine::<SortableRow>::default().with_policy(policy));
    let loading = RwSignal::new(false);

    // Fetch when the owning collection changes or a refresh is requested
    Effect::new(move |_| {
        let _ = ctx.refresh_version();
        let context = context_id.get();
        engine.update(|e| {
            if e.context_id().copied() != context {
                e.reset_context(context, Vec::new());
            }
        });
        if kind != CollectionKind::Categories && context.is_none() {
            return;
        }

        loading.set(true);
        spawn_local(async move {
            let result = commands::list_rows(&ctx.config(), kind, context).await;
            loading.try_set(false);
            match result {
                Ok(rows) => {
                    engine.try_update(|e| {
                        // A newer context may have been picked meanwhile
                        if e.context_id().copied() == context {
                            debug!(collection = kind.label(), count = rows.len(), "rows loaded");
                            e.replace(rows);
                        }
                    });
                }
                Err(failure) => ctx.report_fetch_error(kind.label(), &failure),
            }
        });
    });

    let dnd = create_dnd_signals();

    // Advisory: no new drags while a reorder is being saved
    Effect::new(move |_| {
        dnd.set_disabled(engine.with(|e| e.is_updating()));
    });

    bind_drag_listeners(dnd, move |active_id, over_id| {
        let Some(begun) = engine.try_update(|e| e.begin(DragEnd::new(active_id, over_id))) else {
            return;
        };
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(rejection) => {
                debug!(collection = kind.label(), %rejection, "drag ignored");
                return;
            }
        };

        let update = ticket.request().clone();
        spawn_local(async move {
            let outcome = commands::save_sequence(&ctx.config(), kind, &update).await;
            let failure = outcome.as_ref().err().cloned();
            match engine.try_update(move |e| e.settle(ticket, outcome)) {
                Some(Ok(())) => {
                    info!(
                        collection = kind.label(),
                        item = update.item_id,
                        sequence = update.sequence,
                        "order saved"
                    );
                }
                Some(Err(failure)) => ctx.report_mutation_error("save the new order", &failure),
                // List already unmounted; the failure still matters
                None => {
                    if let Some(failure) = failure {
                        ctx.report_mutation_error("save the new order", &failure);
                    }
                }
            }
        });
    });

    let rows = move || engine.with(|e| e.items().to_vec());
    let is_updating = move || engine.with(|e| e.is_updating());
    let is_empty = move || !loading.get() && engine.with(|e| e.items().is_empty());

    view! {
        <div class="sortable-list" class:updating=is_updating>
            <Show when=is_updating>
                <p class="sortable-status">"Saving order..."</p>
            </Show>
            <Show when=is_empty>
                <p class="sortable-empty">{empty_text}</p>
            </Show>

            <For
                each=rows
                key=|row| (row.id, row.sequence, row.title.clone())
                children=move |row| {
                    let id = row.id;

                    // DnD handlers
                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mouseenter = make_on_mouseenter(dnd, id);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let row_class = move || {
                        let mut c = String::from("sortable-row");
                        if selected.get() == Some(id) { c.push_str(" selected"); }
                        if dnd.is_dragging(id) { c.push_str(" dragging"); }
                        if dnd.is_over(id) { c.push_str(" drop-target"); }
                        c
                    };

                    view! {
                        <div
                            class=row_class
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                            on:click=move |_| {
                                // The click that ends a drag is not a selection
                                if dnd.drag_just_ended.get_untracked() { return; }
                                if let Some(on_select) = on_select {
                                    on_select.run(id);
                                }
                            }
                        >
                            <span class="drag-handle">"⋮⋮"</span>
                            <span class="row-sequence">{row.sequence}</span>
                            <span class="row-title">{row.title.clone()}</span>
                            {row.detail.clone().map(|detail| view! {
                                <span class="row-detail">{detail}</span>
                            })}
                        </div>
                    }
                }
            />
        </div>
    }
}
