//! Path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → chain.rs (ordered resolve-or-delegate)
//!     → resolver.rs (each source answers hit or miss)
//!     → Return: resolved URL + source, or None (terminal handler)
//!
//! Chain Assembly (at startup):
//!     store resolver → rules file table → static table
//!     → Freeze as immutable ResolverChain
//! ```
//!
//! # Design Decisions
//! - Sources compiled at startup, immutable at runtime
//! - Exact path keys only, no prefix or pattern matching
//! - First hit wins (ordered by chain position)
//! - A miss is a plain `None`, never an error

pub mod chain;
pub mod resolver;
pub mod table;

pub use chain::{Resolved, ResolverChain};
pub use resolver::Resolver;
pub use table::{MappingTable, PathEntry};
