//! Tinylink - an in-memory URL shortening engine
//!
//! Generates collision-free short codes, stores mappings with time-based
//! and access-count-based expiry, scopes mutation to the creating user and
//! reclaims expired entries in the background.
//!
//! # Architecture
//! - `identity`: user registry (opaque ids, ownership)
//! - `storage`: link table, lifecycle operations and read-only views
//! - `reclamation`: periodic removal of expired links
//! - `services`: `ShortenerService`, the facade for external callers
//! - `config`: TOML/env configuration
//! - `system`: logging and signal handling for the host binary
//!
//! # Example
//! ```no_run
//! use tinylink::services::{ServiceOptions, ShortenerService};
//!
//! #[tokio::main]
//! async fn main() -> tinylink::errors::Result<()> {
//!     let service = ShortenerService::start(ServiceOptions::default())?;
//!     let alice = service.create_user("Alice");
//!     let code = service.create_link("https://example.com", &alice.id, Some(2))?;
//!     assert_eq!(service.resolve_link(&code)?, "https://example.com");
//!     service.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod identity;
pub mod reclamation;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
