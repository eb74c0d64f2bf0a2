//! Identity registry
//!
//! Users are created once and never mutated; links reference them by id.

mod registry;

pub use registry::{User, UserRegistry};
