//! Optimistic Sync
//!
//! Client-side reconciliation between speculative view state and server truth.
//!
//! - reorder: drag-and-drop re-sequencing with snapshot rollback
//! - toggle: status switches whose confirmation arrives through later refreshes
//! - writer: the narrow update contract the engines need from a backend

mod entity;
mod error;
mod reorder;
mod status;
mod toggle;
mod writer;

pub use entity::{Entity, Sequenced};
pub use error::{MutationError, Rejection};
pub use reorder::{
    move_item, normalize_sequences, DragEnd, ReorderEngine, ReorderPolicy, ReorderTicket,
    SequenceUpdate,
};
pub use status::{BadgeTone, ScheduleStatus, ToggleStatus};
pub use toggle::{StatusUpdate, ToggleReconciler, ToggleTicket};
pub use writer::{SequenceWriter, StatusWriter};
