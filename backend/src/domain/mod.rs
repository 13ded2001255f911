//! Domain entities, command services, and ports.
//!
//! Everything in this module is transport agnostic. Inbound adapters map
//! domain failures to HTTP responses; outbound adapters implement the driven
//! ports against real infrastructure.

pub mod error;
pub mod identity;
pub mod ports;
pub mod score;
pub mod score_service;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::identity::{
    Caller, LoginCredentials, LoginValidationError, Principal, Role, UserId,
};
pub use self::score::{NewScore, Score, ScoreId, ScorePayload};
pub use self::score_service::ScoreCommandService;
pub use self::user::User;

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
