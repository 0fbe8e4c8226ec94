//! Admin API Client
//!
//! reqwest bindings to the console backend: collection fetches, the
//! sequence update used by reorderable lists, and the schedule status
//! update used by toggles. Update responses are classified into
//! [`optimistic_sync::MutationError`].

mod client;
mod config;
mod error;
mod models;
mod response;

pub use client::{AdminApiClient, SequenceEndpoint};
pub use config::{AdminApiConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use models::{Category, CollectionKind, NotificationSchedule, Video, Workout};
pub use response::{classify_sequence_response, classify_status_response};
