//! Lookup port for user records.
//!
//! The score service consults the directory to validate owner references at
//! write time; it never mutates users.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::identity::UserId;
use crate::domain::user::User;

/// Errors surfaced by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// Directory connection could not be established.
    #[error("user directory connection failed: {message}")]
    Connection { message: String },
    /// Lookup failed during execution.
    #[error("user directory lookup failed: {message}")]
    Query { message: String },
}

impl UserDirectoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for lookup failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for resolving user references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError>;
}

/// Fixture implementation for tests that do not exercise the directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }
}
