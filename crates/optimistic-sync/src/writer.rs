//! Writer Traits
//!
//! The narrow update contract the engines need from a backend.
//! Futures are not `Send`: mutations run on the single-threaded UI loop.

use async_trait::async_trait;

use crate::error::MutationError;
use crate::reorder::SequenceUpdate;
use crate::toggle::StatusUpdate;

/// Persists the moved item's new ordinal
#[async_trait(?Send)]
pub trait SequenceWriter<I> {
    async fn write_sequence(&self, update: &SequenceUpdate<I>) -> Result<(), MutationError>;
}

/// Persists a requested switch position
#[async_trait(?Send)]
pub trait StatusWriter<I> {
    async fn write_status(&self, update: &StatusUpdate<I>) -> Result<(), MutationError>;
}
