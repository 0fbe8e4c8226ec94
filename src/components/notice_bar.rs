//! Notice Bar Component
//!
//! Info and error notices, plus the recent log lines on demand.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_console_store, ConsoleStateStoreFields};

const RECENT_LOG_LINES: usize = 50;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let store = use_console_store();
    // Snapshot of the log taken when the panel is opened
    let log_lines = RwSignal::new(None::<Vec<String>>);

    let toggle_log = move |_: web_sys::MouseEvent| {
        log_lines.update(|lines| {
            *lines = match lines {
                Some(_) => None,
                None => Some(rolling_logger::recent(RECENT_LOG_LINES)),
            };
        });
    };

    view! {
        <div class="notice-bar">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.css_class()>
                            <span class="notice-message">{notice.message.clone()}</span>
                            <button class="notice-dismiss" on:click=move |_| store_dismiss_notice(&store, id)>"×"</button>
                        </div>
                    }
                }
            />

            <button class="log-toggle" on:click=toggle_log>
                {move || if log_lines.with(Option::is_some) { "Hide recent log" } else { "Show recent log" }}
            </button>
            {move || log_lines.get().map(|lines| view! {
                <pre class="recent-log">{lines.join("\n")}</pre>
            })}
        </div>
    }
}
