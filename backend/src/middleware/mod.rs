//! HTTP middleware.

pub mod trace;
