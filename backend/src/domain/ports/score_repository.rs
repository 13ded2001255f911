//! Persistence port for score records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::score::{NewScore, Score, ScoreId};

/// Errors surfaced by score store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreRepositoryError {
    /// Store connection could not be established.
    #[error("score repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("score repository query failed: {message}")]
    Query { message: String },
}

impl ScoreRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for storing and retrieving score records.
///
/// The store owns id assignment: [`ScoreRepository::insert`] returns the
/// persisted record with its fresh identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Fetch a score by id.
    async fn find_by_id(&self, id: ScoreId) -> Result<Option<Score>, ScoreRepositoryError>;

    /// Persist a new score, assigning its id.
    async fn insert(&self, score: NewScore) -> Result<Score, ScoreRepositoryError>;

    /// Persist mutations to an existing score. The id never changes.
    async fn update(&self, score: &Score) -> Result<(), ScoreRepositoryError>;

    /// Remove a score permanently, reporting whether a record was removed.
    ///
    /// Absence is an answer, not a store fault: callers decide how to
    /// surface a `false` return.
    async fn delete(&self, id: ScoreId) -> Result<bool, ScoreRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScoreRepository;

#[async_trait]
impl ScoreRepository for FixtureScoreRepository {
    async fn find_by_id(&self, _id: ScoreId) -> Result<Option<Score>, ScoreRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, score: NewScore) -> Result<Score, ScoreRepositoryError> {
        Ok(Score::new(
            ScoreId::new(1),
            score.user_id,
            score.value,
            score.recorded_at,
        ))
    }

    async fn update(&self, _score: &Score) -> Result<(), ScoreRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: ScoreId) -> Result<bool, ScoreRepositoryError> {
        Ok(false)
    }
}
