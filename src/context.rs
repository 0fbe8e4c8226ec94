//! Console Context
//!
//! Shared handles provided via Leptos Context API.

use admin_api::ApiError;
use leptos::prelude::*;
use optimistic_sync::MutationError;
use tracing::{error, warn};

use crate::config::ConsoleConfig;
use crate::session;
use crate::store::{store_push_notice, ConsoleStore, NoticeKind};

/// Console-wide handles provided via context
#[derive(Clone, Copy)]
pub struct ConsoleContext {
    config: StoredValue<ConsoleConfig>,
    store: ConsoleStore,
    /// Bumped to make every mounted view fetch again
    refresh_version: RwSignal<u32>,
}

impl ConsoleContext {
    pub fn new(config: ConsoleConfig, store: ConsoleStore) -> Self {
        Self {
            config: StoredValue::new(config),
            store,
            refresh_version: RwSignal::new(0),
        }
    }

    pub fn config(&self) -> ConsoleConfig {
        self.config.get_value()
    }

    pub fn store(&self) -> ConsoleStore {
        self.store
    }

    /// Tracked read; views fetch again when it changes
    pub fn refresh_version(&self) -> u32 {
        self.refresh_version.get()
    }

    pub fn refresh(&self) {
        self.refresh_version.update(|v| *v = v.wrapping_add(1));
    }

    pub fn notify(&self, message: impl Into<String>) {
        store_push_notice(&self.store, NoticeKind::Info, message);
    }

    /// A write failed. Unauthorized ends the session; anything else is
    /// shown to the user.
    pub fn report_mutation_error(&self, action: &str, failure: &MutationError) {
        if failure.is_fatal() {
            self.end_session();
            return;
        }
        error!(action, error = %failure, "mutation failed");
        store_push_notice(
            &self.store,
            NoticeKind::Error,
            format!("Could not {action}: {failure}"),
        );
    }

    /// A list fetch failed
    pub fn report_fetch_error(&self, what: &str, failure: &ApiError) {
        if failure.is_unauthorized() {
            self.end_session();
            return;
        }
        warn!(what, error = %failure, "fetch failed");
        store_push_notice(
            &self.store,
            NoticeKind::Error,
            format!("Could not load {what}: {failure}"),
        );
    }

    pub fn end_session(&self) {
        session::expire(&self.config.get_value().login_path);
    }
}

pub fn use_console_context() -> ConsoleContext {
    expect_context::<ConsoleContext>()
}
