//! UI Components
//!
//! Reusable Leptos components.

mod category_list;
mod context_picker;
mod notice_bar;
mod notification_schedules;
mod sortable_list;
mod status_badge;
mod status_toggle;
mod tab_bar;
mod video_list;
mod workout_list;

pub use category_list::CategoryList;
pub use context_picker::ContextPicker;
pub use notice_bar::NoticeBar;
pub use notification_schedules::NotificationSchedules;
pub use sortable_list::SortableList;
pub use status_badge::StatusBadge;
pub use status_toggle::StatusToggle;
pub use tab_bar::TabBar;
pub use video_list::VideoList;
pub use workout_list::WorkoutList;
