//! Driving port for score mutations.
//!
//! Inbound adapters call this port to create, update, and delete scores
//! without knowing the backing infrastructure. Every operation takes the
//! caller explicitly so authorization is decided here, never in the adapter.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::identity::Caller;
use crate::domain::score::{Score, ScoreId, ScorePayload};

/// Domain use-case port for score command operations.
///
/// Failure precedence is part of the contract:
/// - every operation fails `Unauthorized` first when the caller is anonymous;
/// - `update_score` reports a missing record before checking ownership, so a
///   non-owner probing an absent id observes `NotFound`, not `Forbidden`;
/// - `delete_score` is admin-only regardless of ownership, asymmetric with
///   `update_score`'s owner-or-admin rule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreCommand: Send + Sync {
    /// Create a score. Admin-only; requires `value`, `userId`, and
    /// `recordedAt` to be present in the payload.
    async fn create_score(&self, caller: &Caller, payload: ScorePayload) -> Result<Score, Error>;

    /// Partially update a score. Owner-or-admin; only fields present in the
    /// payload change.
    async fn update_score(
        &self,
        caller: &Caller,
        id: ScoreId,
        payload: ScorePayload,
    ) -> Result<Score, Error>;

    /// Delete a score permanently. Admin-only.
    async fn delete_score(&self, caller: &Caller, id: ScoreId) -> Result<(), Error>;
}
