//! Catalog Commands
//!
//! Categories, workouts and videos: listing and persisting order.

use admin_api::{ApiError, Category, CollectionKind, Workout};
use optimistic_sync::{MutationError, SequenceUpdate, SequenceWriter};

use super::api_client;
use crate::config::ConsoleConfig;
use crate::models::{sorted_rows, SortableRow};

pub async fn list_categories(config: &ConsoleConfig) -> Result<Vec<Category>, ApiError> {
    api_client(config)?.list_categories().await
}

pub async fn list_workouts(config: &ConsoleConfig, category_id: u64) -> Result<Vec<Workout>, ApiError> {
    api_client(config)?.list_workouts(category_id).await
}

/// Rows of `kind` under `context_id`; kinds that need a context return
/// nothing without one.
pub async fn list_rows(
    config: &ConsoleConfig,
    kind: CollectionKind,
    context_id: Option<u64>,
) -> Result<Vec<SortableRow>, ApiError> {
    let client = api_client(config)?;
    match (kind, context_id) {
        (CollectionKind::Categories, _) => Ok(sorted_rows(client.list_categories().await?)),
        (CollectionKind::Workouts, Some(category_id)) => {
            Ok(sorted_rows(client.list_workouts(category_id).await?))
        }
        (CollectionKind::Videos, Some(workout_id)) => {
            Ok(sorted_rows(client.list_videos(workout_id).await?))
        }
        (CollectionKind::Workouts | CollectionKind::Videos, None) => Ok(Vec::new()),
    }
}

pub async fn save_sequence(
    config: &ConsoleConfig,
    kind: CollectionKind,
    update: &SequenceUpdate<u64>,
) -> Result<(), MutationError> {
    let client = api_client(config)?;
    client.sequences(kind).write_sequence(update).await
}
