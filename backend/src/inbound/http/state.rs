//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ScoreCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub scores: Arc<dyn ScoreCommand>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the driving ports behind the handlers.
    pub fn new(scores: Arc<dyn ScoreCommand>, login: Arc<dyn LoginService>) -> Self {
        Self { scores, login }
    }
}
