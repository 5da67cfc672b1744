//! Ordered resolver chain.
//!
//! # Responsibilities
//! - Hold the resolvers in fallback order
//! - Ask each in turn, stopping at the first hit
//! - Report which source answered
//!
//! # Design Decisions
//! - Assembled once before serving, never mutated afterwards (shared via Arc)
//! - The chain never invents a URL; exhaustion is `None` and the caller
//!   hands the request to its terminal handler

use std::borrow::Cow;

use crate::routing::Resolver;

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The redirect target.
    pub url: Cow<'a, str>,
    /// Name of the resolver that produced it.
    pub source: &'a str,
}

/// Resolvers evaluated in order until one hits.
#[derive(Debug, Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a resolver consulted after every resolver already in the chain.
    pub fn then(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Resolve `path` against each resolver in order.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        self.resolvers.iter().find_map(|resolver| {
            resolver.resolve(path).map(|url| Resolved {
                url,
                source: resolver.name(),
            })
        })
    }

    /// Resolver names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

/// A chain is itself a resolver, so chains can nest.
impl Resolver for ResolverChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn resolve(&self, path: &str) -> Option<Cow<'_, str>> {
        ResolverChain::resolve(self, path).map(|resolved| resolved.url)
    }
}
