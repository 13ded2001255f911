//! Caller identity primitives.
//!
//! The authenticated principal is a value passed explicitly into each command
//! operation rather than ambient request state, so the authorization rules
//! stay testable without a running HTTP stack.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable numeric user identifier assigned by the user directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw directory identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse-grained authorization role held by a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary authenticated user.
    User,
    /// Administrative user allowed to manage every score.
    Admin,
}

/// Resolved identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: UserId,
    roles: Vec<Role>,
}

impl Principal {
    /// Construct a principal from the caller's id and role set.
    pub fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    /// Identifier of the authenticated user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Whether the principal holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the principal holds the administrative role.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Identity attached to an inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No valid identity was presented.
    Anonymous,
    /// A fully authenticated principal.
    Authenticated(Principal),
}

impl Caller {
    /// The principal behind the caller, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(principal) => Some(principal),
        }
    }
}

impl From<Principal> for Caller {
    fn from(principal: Principal) -> Self {
        Self::Authenticated(principal)
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Username string suitable for directory lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![Role::User], false)]
    #[case(vec![Role::User, Role::Admin], true)]
    #[case(vec![], false)]
    fn is_admin_reflects_role_set(#[case] roles: Vec<Role>, #[case] expected: bool) {
        let principal = Principal::new(UserId::new(1), roles);
        assert_eq!(principal.is_admin(), expected);
    }

    #[test]
    fn anonymous_caller_has_no_principal() {
        assert!(Caller::Anonymous.principal().is_none());
    }

    #[test]
    fn authenticated_caller_exposes_principal() {
        let principal = Principal::new(UserId::new(7), vec![Role::User]);
        let caller = Caller::from(principal.clone());
        assert_eq!(caller.principal(), Some(&principal));
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("ada", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }
}
