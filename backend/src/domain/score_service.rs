//! Score command service.
//!
//! Implements the driving [`ScoreCommand`] port: every operation runs an
//! authorization check, then lookups and field validation, and only then a
//! single store mutation. All failures are terminal for the command; nothing
//! is persisted on any failure path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::error::Error;
use crate::domain::identity::{Caller, Principal, UserId};
use crate::domain::ports::{
    ScoreCommand, ScoreRepository, ScoreRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::score::{parse_recorded_at, NewScore, Score, ScoreId, ScorePayload};

/// Score command service implementing the driving port.
#[derive(Clone)]
pub struct ScoreCommandService<S, U> {
    scores: Arc<S>,
    users: Arc<U>,
}

impl<S, U> ScoreCommandService<S, U> {
    /// Create a new service over the given store and directory.
    pub fn new(scores: Arc<S>, users: Arc<U>) -> Self {
        Self { scores, users }
    }
}

impl<S, U> ScoreCommandService<S, U>
where
    S: ScoreRepository,
    U: UserDirectory,
{
    fn map_score_error(error: ScoreRepositoryError) -> Error {
        match error {
            ScoreRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("score repository unavailable: {message}"))
            }
            ScoreRepositoryError::Query { message } => {
                Error::internal(format!("score repository error: {message}"))
            }
        }
    }

    fn map_directory_error(error: UserDirectoryError) -> Error {
        match error {
            UserDirectoryError::Connection { message } => {
                Error::service_unavailable(format!("user directory unavailable: {message}"))
            }
            UserDirectoryError::Query { message } => {
                Error::internal(format!("user directory error: {message}"))
            }
        }
    }

    fn require_principal(caller: &Caller) -> Result<&Principal, Error> {
        caller
            .principal()
            .ok_or_else(|| Error::unauthorized("authentication required"))
    }

    fn require_admin(principal: &Principal) -> Result<(), Error> {
        if principal.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden("administrative role required"))
        }
    }

    fn missing_fields_error(payload: &ScorePayload) -> Error {
        let mut missing = Vec::new();
        if payload.value.is_none() {
            missing.push("value");
        }
        if payload.user_id.is_none() {
            missing.push("userId");
        }
        if payload.recorded_at.is_none() {
            missing.push("recordedAt");
        }
        Error::unprocessable_entity("value, userId, and recordedAt are required").with_details(
            json!({
                "missing": missing,
                "code": "missing_fields",
            }),
        )
    }

    fn parse_recorded_field(raw: &str) -> Result<DateTime<Utc>, Error> {
        parse_recorded_at(raw).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "recordedAt",
                "value": raw,
                "code": "invalid_timestamp",
            }))
        })
    }

    /// Validate an owner reference, failing with a bad-request error when the
    /// user does not exist.
    async fn resolve_owner(&self, user_id: UserId) -> Result<UserId, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_directory_error)?;
        match user {
            Some(user) => Ok(user.id()),
            None => Err(
                Error::invalid_request("userId does not reference a known user").with_details(
                    json!({
                        "field": "userId",
                        "value": user_id,
                        "code": "unknown_user",
                    }),
                ),
            ),
        }
    }

    async fn find_existing(&self, id: ScoreId) -> Result<Option<Score>, Error> {
        self.scores
            .find_by_id(id)
            .await
            .map_err(Self::map_score_error)
    }

    fn score_not_found(id: ScoreId) -> Error {
        Error::not_found("score not found").with_details(json!({
            "scoreId": id,
            "code": "score_not_found",
        }))
    }
}

#[async_trait]
impl<S, U> ScoreCommand for ScoreCommandService<S, U>
where
    S: ScoreRepository,
    U: UserDirectory,
{
    async fn create_score(&self, caller: &Caller, payload: ScorePayload) -> Result<Score, Error> {
        let principal = Self::require_principal(caller)?;
        Self::require_admin(principal)?;

        let (Some(value), Some(user_id), Some(raw_recorded_at)) =
            (payload.value, payload.user_id, payload.recorded_at.as_deref())
        else {
            return Err(Self::missing_fields_error(&payload));
        };

        // The owner reference is checked before the timestamp parses, so an
        // unknown user is reported even when both fields are bad.
        let owner = self.resolve_owner(user_id).await?;
        let recorded_at = Self::parse_recorded_field(raw_recorded_at)?;

        let score = self
            .scores
            .insert(NewScore {
                user_id: owner,
                value,
                recorded_at,
            })
            .await
            .map_err(Self::map_score_error)?;
        debug!(score_id = %score.id(), user_id = %owner, "score created");
        Ok(score)
    }

    async fn update_score(
        &self,
        caller: &Caller,
        id: ScoreId,
        payload: ScorePayload,
    ) -> Result<Score, Error> {
        let principal = Self::require_principal(caller)?;

        // Existence is checked before ownership: a missing record yields
        // `NotFound` even to callers who would otherwise be forbidden.
        let mut score = self
            .find_existing(id)
            .await?
            .ok_or_else(|| Self::score_not_found(id))?;

        if principal.user_id() != score.user_id() && !principal.is_admin() {
            return Err(Error::forbidden("only the owner or an admin may update"));
        }

        // Validate every present field before mutating anything, so a later
        // field's failure never leaves a half-applied entity.
        let new_owner = match payload.user_id {
            Some(user_id) => Some(self.resolve_owner(user_id).await?),
            None => None,
        };
        let new_recorded_at = payload
            .recorded_at
            .as_deref()
            .map(Self::parse_recorded_field)
            .transpose()?;

        if let Some(owner) = new_owner {
            score.set_user_id(owner);
        }
        if let Some(value) = payload.value {
            score.set_value(value);
        }
        if let Some(recorded_at) = new_recorded_at {
            score.set_recorded_at(recorded_at);
        }

        self.scores
            .update(&score)
            .await
            .map_err(Self::map_score_error)?;
        debug!(score_id = %id, "score updated");
        Ok(score)
    }

    async fn delete_score(&self, caller: &Caller, id: ScoreId) -> Result<(), Error> {
        let principal = Self::require_principal(caller)?;
        Self::require_admin(principal)?;

        // The store answers existence and removal in one step, so a record
        // vanishing under a concurrent delete still reads as `NotFound`.
        let removed = self
            .scores
            .delete(id)
            .await
            .map_err(Self::map_score_error)?;
        if !removed {
            return Err(Self::score_not_found(id));
        }
        debug!(score_id = %id, "score deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "score_service_tests.rs"]
mod score_service_tests;
