//! In-memory persistence adapters.
//!
//! Thin adapters only: they translate between stored state and domain types
//! and map their failures into the typed port errors. No business logic
//! resides here.

mod memory;

pub use memory::{InMemoryScoreRepository, InMemoryUserDirectory};
