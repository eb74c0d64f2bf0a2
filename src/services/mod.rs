//! Service layer for business logic
//!
//! The facade external callers (CLI, a future HTTP front-end) talk to.

mod shortener_service;

pub use shortener_service::*;
