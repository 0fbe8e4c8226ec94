//! Global Console State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

/// Notices kept on screen at once; older ones are dropped first
pub const MAX_NOTICES: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConsoleTab {
    #[default]
    Categories,
    Workouts,
    Videos,
    Notifications,
}

impl ConsoleTab {
    pub const ALL: [ConsoleTab; 4] = [
        ConsoleTab::Categories,
        ConsoleTab::Workouts,
        ConsoleTab::Videos,
        ConsoleTab::Notifications,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConsoleTab::Categories => "Categories",
            ConsoleTab::Workouts => "Workouts",
            ConsoleTab::Videos => "Videos",
            ConsoleTab::Notifications => "Notification schedules",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "notice notice-info",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// Global console state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ConsoleState {
    pub active_tab: ConsoleTab,
    /// Category whose workouts are listed
    pub selected_category: Option<u64>,
    /// Workout whose videos are listed
    pub selected_workout: Option<u64>,
    pub notices: Vec<Notice>,
    pub next_notice_id: u32,
}

/// Type alias for the store
pub type ConsoleStore = Store<ConsoleState>;

/// Get the console store from context
pub fn use_console_store() -> ConsoleStore {
    expect_context::<ConsoleStore>()
}

/// Append a notice, dropping the oldest beyond [`MAX_NOTICES`]
pub fn push_bounded(notices: &mut Vec<Notice>, notice: Notice) {
    notices.push(notice);
    if notices.len() > MAX_NOTICES {
        let excess = notices.len() - MAX_NOTICES;
        notices.drain(..excess);
    }
}

// ========================
// Store Helper Functions
// ========================

pub fn store_push_notice(store: &ConsoleStore, kind: NoticeKind, message: impl Into<String>) {
    let id = {
        let field = store.next_notice_id();
        let mut next = field.write();
        *next = next.wrapping_add(1);
        *next
    };
    push_bounded(
        &mut store.notices().write(),
        Notice {
            id,
            kind,
            message: message.into(),
        },
    );
}

pub fn store_dismiss_notice(store: &ConsoleStore, notice_id: u32) {
    store.notices().write().retain(|notice| notice.id != notice_id);
}

/// Select a category; its previously selected workout no longer applies
pub fn store_select_category(store: &ConsoleStore, category_id: Option<u64>) {
    if store.selected_category().get_untracked() == category_id {
        return;
    }
    store.selected_category().set(category_id);
    store.selected_workout().set(None);
}

pub fn store_select_workout(store: &ConsoleStore, workout_id: Option<u64>) {
    store.selected_workout().set(workout_id);
}

pub fn store_set_tab(store: &ConsoleStore, tab: ConsoleTab) {
    store.active_tab().set(tab);
}
