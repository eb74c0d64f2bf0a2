//! System-level modules
//!
//! - Logging initialization
//! - Shutdown signal handling for the hosting binary

pub mod logging;
pub mod signal;
