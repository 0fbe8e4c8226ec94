//! Notification Schedules View
//!
//! Schedule table with an on/off switch per row. The switch flips at once;
//! refreshes only overrule it after the backend reports the new status.

use admin_api::NotificationSchedule;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use optimistic_sync::{ScheduleStatus, ToggleReconciler};
use tracing::{debug, info, warn};

use crate::commands;
use crate::components::{StatusBadge, StatusToggle};
use crate::context::{use_console_context, ConsoleContext};

type ScheduleReconciler = ToggleReconciler<u64, ScheduleStatus>;

/// Who asked for a fetch; polling failures are logged, not announced
#[derive(Clone, Copy, PartialEq, Eq)]
enum FetchCause {
    Explicit,
    Poll,
}

async fn refresh_schedules(
    ctx: ConsoleContext,
    schedules: RwSignal<Vec<NotificationSchedule>>,
    reconciler: RwSignal<ScheduleReconciler>,
    cause: FetchCause,
) {
    match commands::list_schedules(&ctx.config()).await {
        Ok(list) => {
            reconciler.try_update(|r| r.reconcile(list.iter().map(|s| (s.id, s.status))));
            schedules.try_set(list);
        }
        Err(failure) if cause == FetchCause::Poll && !failure.is_unauthorized() => {
            warn!(error = %failure, "schedule poll failed");
        }
        Err(failure) => ctx.report_fetch_error("notification schedules", &failure),
    }
}

#[component]
pub fn NotificationSchedules() -> impl IntoView {
    let ctx = use_console_context();
    let schedules = RwSignal::new(Vec::<NotificationSchedule>::new());
    let reconciler = RwSignal::new(ScheduleReconciler::new());

    let refresh = move |cause: FetchCause| {
        spawn_local(refresh_schedules(ctx, schedules, reconciler, cause));
    };

    Effect::new(move |_| {
        let _ = ctx.refresh_version();
        refresh(FetchCause::Explicit);
    });

    // Poll until this view is unmounted
    let poll_interval_ms = ctx.config().poll_interval_ms;
    spawn_local(async move {
        loop {
            TimeoutFuture::new(poll_interval_ms).await;
            if reconciler.is_disposed() {
                break;
            }
            refresh(FetchCause::Poll);
        }
    });

    let on_toggle = Callback::new(move |(id, server): (u64, ScheduleStatus)| {
        let Some(clicked) = reconciler.try_update(|r| r.click(id, server)) else {
            return;
        };
        let ticket = match clicked {
            Ok(ticket) => ticket,
            Err(rejection) => {
                debug!(schedule = id, %rejection, "toggle ignored");
                return;
            }
        };

        let update = ticket.request().clone();
        let next = ticket.next();
        spawn_local(async move {
            let outcome = commands::save_status(&ctx.config(), &update).await;
            let failure = outcome.as_ref().err().cloned();
            match reconciler.try_update(move |r| r.settle(ticket, outcome)) {
                Some(Ok(())) => {
                    info!(schedule = id, status = %next, "schedule status updated");
                    ctx.notify(format!("Schedule is now {}", next.label().to_lowercase()));
                    refresh(FetchCause::Explicit);
                }
                Some(Err(failure)) => ctx.report_mutation_error("update the schedule status", &failure),
                None => {
                    if let Some(failure) = failure {
                        ctx.report_mutation_error("update the schedule status", &failure);
                    }
                }
            }
        });
    });

    view! {
        <section class="schedule-view">
            <h2>"Notification schedules"</h2>
            <Show
                when=move || !schedules.with(Vec::is_empty)
                fallback=|| view! { <p class="view-hint">"No schedules."</p> }
            >
                <table class="schedule-table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Scheduled"</th>
                            <th>"Audience"</th>
                            <th>"Status"</th>
                            <th>"Active"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || schedules.get()
                            key=|s| (s.id, s.status, s.title.clone())
                            children=move |schedule| {
                                let id = schedule.id;
                                let server = schedule.status;
                                let display = Signal::derive(move || {
                                    reconciler.with(|r| r.display_status(&id, server))
                                });
                                let disabled = Signal::derive(move || {
                                    !reconciler.with(|r| r.can_toggle(&id, server))
                                });
                                let awaiting_refresh = move || {
                                    reconciler.with(|r| r.expected_status(&id).is_some())
                                };

                                view! {
                                    <tr class="schedule-row">
                                        <td>{schedule.title.clone()}</td>
                                        <td>{schedule.scheduled_at.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td>{schedule.audience.clone().unwrap_or_else(|| "All users".to_string())}</td>
                                        <td><StatusBadge status=display /></td>
                                        <td>
                                            <StatusToggle
                                                status=display
                                                disabled=disabled
                                                on_toggle=Callback::new(move |_| on_toggle.run((id, server)))
                                            />
                                            <Show when=awaiting_refresh>
                                                <span class="pending-hint">"syncing"</span>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}
