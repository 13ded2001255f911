//! User directory record.
//!
//! The directory owns the canonical user data; score commands only consult it
//! to validate owner references and to resolve login credentials into a
//! principal.

use serde::{Deserialize, Serialize};

use super::identity::{Role, UserId};

/// A user known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    roles: Vec<Role>,
}

impl User {
    /// Construct a directory record.
    pub fn new(id: UserId, username: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id,
            username: username.into(),
            roles,
        }
    }

    /// Stable directory identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name, unique within the directory.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Roles granted to this user.
    pub fn roles(&self) -> &[Role] {
        self.roles.as_slice()
    }
}
