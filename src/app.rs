//! Admin Console App
//!
//! Header, tab bar, notices and the active view.

use leptos::prelude::*;
use reactive_stores::Store;
use tracing::{info, warn};

use crate::components::{CategoryList, NoticeBar, NotificationSchedules, TabBar, VideoList, WorkoutList};
use crate::config::ConsoleConfig;
use crate::context::ConsoleContext;
use crate::session;
use crate::store::{ConsoleState, ConsoleStateStoreFields, ConsoleTab};

#[component]
pub fn App() -> impl IntoView {
    let config = ConsoleConfig::from_env();
    info!(
        api = %config.api_base_url,
        policy = ?config.reorder_policy,
        poll_interval_ms = config.poll_interval_ms,
        "admin console starting"
    );
    if !session::has_token() {
        warn!("no admin token stored; requests will be rejected");
    }

    // Provide store and context to all children
    let store = Store::new(ConsoleState::default());
    provide_context(store);
    let ctx = ConsoleContext::new(config, store);
    provide_context(ctx);

    // Switching tabs unmounts the previous view together with its engine
    let active_view = move || match store.active_tab().get() {
        ConsoleTab::Categories => view! { <CategoryList /> }.into_any(),
        ConsoleTab::Workouts => view! { <WorkoutList /> }.into_any(),
        ConsoleTab::Videos => view! { <VideoList /> }.into_any(),
        ConsoleTab::Notifications => view! { <NotificationSchedules /> }.into_any(),
    };

    view! {
        <div class="console-layout">
            <header class="console-header">
                <h1>"Admin Console"</h1>
                <button class="refresh-btn" on:click=move |_| ctx.refresh()>"Refresh"</button>
            </header>

            <TabBar />
            <NoticeBar />

            <main class="console-content">
                {active_view}
            </main>
        </div>
    }
}
