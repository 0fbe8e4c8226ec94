//! Notification Commands

use admin_api::{ApiError, NotificationSchedule};
use optimistic_sync::{MutationError, StatusUpdate, StatusWriter};

use super::api_client;
use crate::config::ConsoleConfig;

pub async fn list_schedules(config: &ConsoleConfig) -> Result<Vec<NotificationSchedule>, ApiError> {
    api_client(config)?.list_notification_schedules().await
}

pub async fn save_status(
    config: &ConsoleConfig,
    update: &StatusUpdate<u64>,
) -> Result<(), MutationError> {
    let client = api_client(config)?;
    client.write_status(update).await
}
