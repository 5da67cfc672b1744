//! URL redirect service library.
//!
//! A request path is resolved through a chain of sources (persistent store,
//! declarative rule file, built-in table). The first source that knows the
//! path wins and the client is sent a `303 See Other`; when none does, the
//! request falls through to a terminal handler.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod rules;
pub mod storage;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{MappingTable, PathEntry, Resolver, ResolverChain};
pub use storage::PathStore;
