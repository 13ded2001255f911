//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports are called by inbound adapters; driven ports are implemented
//! by outbound adapters. Each driven port exposes strongly typed errors so
//! adapters map their failures into predictable variants.

mod login_service;
mod score_command;
mod score_repository;
mod user_directory;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use score_command::MockScoreCommand;
pub use score_command::ScoreCommand;
#[cfg(test)]
pub use score_repository::MockScoreRepository;
pub use score_repository::{FixtureScoreRepository, ScoreRepository, ScoreRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
