//! The capability every path source implements.
//!
//! # Responsibilities
//! - Look up a request path as an exact key
//! - Report a hit with its URL, or a miss
//!
//! # Design Decisions
//! - Synchronous: sources are in-memory tables or bounded local reads
//! - Failures inside a source are absorbed by that source and reported as a miss

use std::borrow::Cow;
use std::sync::Arc;

/// A source that can map a request path to a redirect target.
pub trait Resolver: Send + Sync + std::fmt::Debug {
    /// Short label for logs and metrics (e.g. `"static"`, `"store"`).
    fn name(&self) -> &str;

    /// Returns the URL for `path`, or `None` if this source has no entry.
    fn resolve(&self, path: &str) -> Option<Cow<'_, str>>;
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, path: &str) -> Option<Cow<'_, str>> {
        (**self).resolve(path)
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, path: &str) -> Option<Cow<'_, str>> {
        (**self).resolve(path)
    }
}
