//! Backend Models
//!
//! Records as the backend serves them, plus the per-collection naming of
//! the sequence update body.

use optimistic_sync::{ScheduleStatus, SequenceUpdate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default)]
    pub workout_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: u64,
    pub category_id: u64,
    pub title: String,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: u64,
    pub workout_id: u64,
    pub title: String,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSchedule {
    pub id: u64,
    pub title: String,
    pub status: ScheduleStatus,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
}

/// List bodies come either bare or wrapped in `{ "data": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Bare(Vec<T>),
    Envelope { data: Vec<T> },
}

impl<T> ListBody<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Envelope { data } => data,
        }
    }
}

/// The reorderable collections and how their sequence writes are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Categories,
    /// Workouts within one category
    Workouts,
    /// Videos within one workout
    Videos,
}

impl CollectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Categories => "categories",
            CollectionKind::Workouts => "workouts",
            CollectionKind::Videos => "videos",
        }
    }

    pub fn sequence_path(&self) -> &'static str {
        match self {
            CollectionKind::Categories => "/categories/sequence",
            CollectionKind::Workouts => "/workouts/sequence",
            CollectionKind::Videos => "/videos/sequence",
        }
    }

    /// Field carrying the moved item's id
    pub fn item_field(&self) -> &'static str {
        match self {
            CollectionKind::Categories => "categoryId",
            CollectionKind::Workouts => "workoutId",
            CollectionKind::Videos => "videoId",
        }
    }

    /// Field carrying the owning collection's id, if the collection has one
    pub fn context_field(&self) -> Option<&'static str> {
        match self {
            CollectionKind::Categories => None,
            CollectionKind::Workouts => Some("categoryId"),
            CollectionKind::Videos => Some("workoutId"),
        }
    }

    /// `{ <item>, <context>?, sequence }`
    pub fn sequence_body(&self, update: &SequenceUpdate<u64>) -> Value {
        let mut body = Map::new();
        body.insert(self.item_field().to_string(), Value::from(update.item_id));
        if let (Some(field), Some(context_id)) = (self.context_field(), update.context_id) {
            body.insert(field.to_string(), Value::from(context_id));
        }
        body.insert("sequence".to_string(), Value::from(update.sequence));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(item_id: u64, context_id: Option<u64>, sequence: u32) -> SequenceUpdate<u64> {
        SequenceUpdate {
            item_id,
            context_id,
            sequence,
        }
    }

    #[test]
    fn test_category_body_has_no_context() {
        let body = CollectionKind::Categories.sequence_body(&update(3, None, 1));
        assert_eq!(body, json!({ "categoryId": 3, "sequence": 1 }));
    }

    #[test]
    fn test_workout_body_carries_category() {
        let body = CollectionKind::Workouts.sequence_body(&update(11, Some(2), 4));
        assert_eq!(body, json!({ "workoutId": 11, "categoryId": 2, "sequence": 4 }));
    }

    #[test]
    fn test_video_body_carries_workout() {
        let body = CollectionKind::Videos.sequence_body(&update(70, Some(11), 2));
        assert_eq!(body, json!({ "videoId": 70, "workoutId": 11, "sequence": 2 }));
    }

    #[test]
    fn test_category_ignores_stray_context() {
        let body = CollectionKind::Categories.sequence_body(&update(3, Some(9), 2));
        assert_eq!(body, json!({ "categoryId": 3, "sequence": 2 }));
    }

    #[test]
    fn test_list_body_accepts_both_shapes() {
        let bare: ListBody<Category> =
            serde_json::from_str(r#"[{"id":1,"name":"Yoga","sequence":1}]"#).unwrap();
        let wrapped: ListBody<Category> = serde_json::from_str(
            r#"{"data":[{"id":1,"name":"Yoga","sequence":1,"workoutCount":4}]}"#,
        )
        .unwrap();

        assert_eq!(bare.into_items()[0].name, "Yoga");
        assert_eq!(wrapped.into_items()[0].workout_count, Some(4));
    }

    #[test]
    fn test_schedule_status_parses() {
        let schedule: NotificationSchedule = serde_json::from_str(
            r#"{"id":9,"title":"Morning nudge","status":"partial_success","scheduledAt":"2026-01-01T07:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(schedule.status, ScheduleStatus::PartialSuccess);
        assert_eq!(schedule.audience, None);
    }
}
