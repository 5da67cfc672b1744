//! Persistent path store.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     store.rs open (create file + "root" table if absent)
//!     → seed baseline entries (idempotent upserts)
//!     → resolver.rs wraps a handle clone into the chain
//!
//! Per request:
//!     resolver.rs → store.rs get (one read transaction, no cache)
//!
//! Shutdown:
//!     store.rs close (after the server has drained)
//! ```
//!
//! # Design Decisions
//! - redb: embedded, ordered, concurrent readers without external locking
//! - Keys and values are raw path / URL strings
//! - Storage failures during a request are a miss, never a client error

pub mod resolver;
pub mod store;

pub use resolver::StoreResolver;
pub use store::{PathStore, StoreError, DEFAULT_STORE_PATH, DEFAULT_TABLE};
