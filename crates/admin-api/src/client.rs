//! HTTP Client

use async_trait::async_trait;
use optimistic_sync::{
    MutationError, SequenceUpdate, SequenceWriter, StatusUpdate, StatusWriter,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::AdminApiConfig;
use crate::error::ApiError;
use crate::models::{Category, CollectionKind, ListBody, NotificationSchedule, Video, Workout};
use crate::response::{classify_sequence_response, classify_status_response, failure_reason};

#[derive(Debug, Clone)]
pub struct AdminApiClient {
    base_url: String,
    bearer_token: Option<String>,
    http: reqwest::Client,
}

impl AdminApiClient {
    pub fn new(config: AdminApiConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        Ok(Self {
            base_url,
            bearer_token: config.bearer_token,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.bearer_token.is_some()
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.base_url, trimmed))
        }
    }

    #[must_use]
    pub fn categories_path() -> &'static str {
        "/categories"
    }

    #[must_use]
    pub fn category_workouts_path(category_id: u64) -> String {
        format!("/categories/{category_id}/workouts")
    }

    #[must_use]
    pub fn workout_videos_path(workout_id: u64) -> String {
        format!("/workouts/{workout_id}/videos")
    }

    #[must_use]
    pub fn notification_schedules_path() -> &'static str {
        "/notifications/schedules"
    }

    #[must_use]
    pub fn notification_status_path(schedule_id: u64) -> String {
        format!("/notifications/{schedule_id}/status")
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_list(Self::categories_path()).await
    }

    pub async fn list_workouts(&self, category_id: u64) -> Result<Vec<Workout>, ApiError> {
        self.get_list(&Self::category_workouts_path(category_id)).await
    }

    pub async fn list_videos(&self, workout_id: u64) -> Result<Vec<Video>, ApiError> {
        self.get_list(&Self::workout_videos_path(workout_id)).await
    }

    pub async fn list_notification_schedules(
        &self,
    ) -> Result<Vec<NotificationSchedule>, ApiError> {
        self.get_list(Self::notification_schedules_path()).await
    }

    /// Persist the moved item's new ordinal within `kind`
    pub async fn update_sequence(
        &self,
        kind: CollectionKind,
        update: &SequenceUpdate<u64>,
    ) -> Result<(), MutationError> {
        let url = self
            .endpoint(kind.sequence_path())
            .ok_or_else(|| MutationError::request_failed("invalid sequence path"))?;
        let body = kind.sequence_body(update);
        debug!(collection = kind.label(), %body, "sending sequence update");

        let response = self
            .authorize(self.http.post(url.as_str()))
            .json(&body)
            .send()
            .await
            .map_err(|error| MutationError::request_failed(error.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| MutationError::request_failed(error.to_string()))?;

        classify_sequence_response(status, &bytes).inspect_err(|error| {
            warn!(collection = kind.label(), item = update.item_id, %error, "sequence update failed");
        })
    }

    /// Ask the backend to switch a schedule on or off
    pub async fn update_status(&self, update: &StatusUpdate<u64>) -> Result<(), MutationError> {
        let url = self
            .endpoint(&Self::notification_status_path(update.id))
            .ok_or_else(|| MutationError::request_failed("invalid status path"))?;
        debug!(schedule = update.id, is_active = update.is_active, "sending status update");

        let response = self
            .authorize(self.http.post(url.as_str()))
            .json(&json!({ "isActive": update.is_active }))
            .send()
            .await
            .map_err(|error| MutationError::request_failed(error.to_string()))?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|error| MutationError::request_failed(error.to_string()))?;

        classify_status_response(status, content_type.as_deref(), &bytes).inspect_err(|error| {
            warn!(schedule = update.id, %error, "status update failed");
        })
    }

    /// Sequence writer bound to one collection kind
    pub fn sequences(&self, kind: CollectionKind) -> SequenceEndpoint<'_> {
        SequenceEndpoint { client: self, kind }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_list<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path).ok_or(ApiError::Request {
            message: format!("invalid path {path:?}"),
        })?;
        let response = self.authorize(self.http.get(url.as_str())).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status,
                body: failure_reason(&bytes).unwrap_or_else(|| "<empty>".to_string()),
            });
        }

        let body: ListBody<T> = serde_json::from_slice(&bytes).map_err(|error| ApiError::Decode {
            message: error.to_string(),
        })?;
        let items = body.into_items();
        debug!(path, count = items.len(), "list fetched");
        Ok(items)
    }
}

#[async_trait(?Send)]
impl StatusWriter<u64> for AdminApiClient {
    async fn write_status(&self, update: &StatusUpdate<u64>) -> Result<(), MutationError> {
        self.update_status(update).await
    }
}

/// [`SequenceWriter`] for one reorderable collection
#[derive(Debug, Clone, Copy)]
pub struct SequenceEndpoint<'a> {
    client: &'a AdminApiClient,
    kind: CollectionKind,
}

#[async_trait(?Send)]
impl<'a> SequenceWriter<u64> for SequenceEndpoint<'a> {
    async fn write_sequence(&self, update: &SequenceUpdate<u64>) -> Result<(), MutationError> {
        self.client.update_sequence(self.kind, update).await
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BaseUrlMissing);
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
