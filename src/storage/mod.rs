//! In-memory link storage
//!
//! - `models`: `ShortLink`, `LinkStats`
//! - `store`: entry lifecycle (create, resolve, delete, limit update)
//! - `query`: read-only views over a snapshot of the store

pub mod models;
mod query;
mod store;

pub use models::{LinkStats, ShortLink};
pub use store::{LinkStore, StoreOptions};
