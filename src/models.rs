//! Frontend Models
//!
//! The row shape every sortable list renders, built from backend records.

use admin_api::{Category, Video, Workout};
use optimistic_sync::{Entity, Sequenced};

/// One draggable row (category, workout or video)
#[derive(Debug, Clone, PartialEq)]
pub struct SortableRow {
    pub id: u64,
    pub title: String,
    pub detail: Option<String>,
    pub sequence: u32,
}

impl Entity for SortableRow {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Sequenced for SortableRow {
    fn sequence(&self) -> u32 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }
}

impl From<Category> for SortableRow {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.name,
            detail: category.workout_count.map(|count| match count {
                1 => "1 workout".to_string(),
                n => format!("{n} workouts"),
            }),
            sequence: category.sequence,
        }
    }
}

impl From<Workout> for SortableRow {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            title: workout.title,
            detail: workout.duration_minutes.map(|minutes| format!("{minutes} min")),
            sequence: workout.sequence,
        }
    }
}

impl From<Video> for SortableRow {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            detail: video.duration_seconds.map(format_duration),
            sequence: video.sequence,
        }
    }
}

/// `m:ss`
fn format_duration(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Rows in the order the backend sequences them
pub fn sorted_rows<T: Into<SortableRow>>(records: Vec<T>) -> Vec<SortableRow> {
    let mut rows: Vec<SortableRow> = records.into_iter().map(Into::into).collect();
    rows.sort_by_key(|row| (row.sequence, row.id));
    rows
}
