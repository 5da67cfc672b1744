//! Declarative rule files.
//!
//! # Data Flow
//! ```text
//! filename hint + raw bytes (read by the caller)
//!     → format.rs (pick decoder from the extension)
//!     → loader.rs (decode entries, check shape)
//!     → MappingTable (last write wins)
//! ```
//!
//! # Design Decisions
//! - Pure: no file I/O here, reading the file is the caller's job
//! - A failed decode yields no table at all, never a partial one
//! - Unknown fields on an entry are ignored

pub mod format;
pub mod loader;

pub use format::RuleFormat;
pub use loader::{decode_entries, load, DecodeError, RuleError};
