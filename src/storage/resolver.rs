//! Chain adapter for the persistent store.

use std::borrow::Cow;

use crate::observability::metrics;
use crate::routing::Resolver;
use crate::storage::PathStore;

/// Resolves paths by reading the store on every call.
#[derive(Debug, Clone)]
pub struct StoreResolver {
    store: PathStore,
}

impl StoreResolver {
    pub fn new(store: PathStore) -> Self {
        Self { store }
    }
}

impl Resolver for StoreResolver {
    fn name(&self) -> &str {
        "store"
    }

    fn resolve(&self, path: &str) -> Option<Cow<'_, str>> {
        match self.store.get(path) {
            Ok(url) => url.map(Cow::Owned),
            Err(e) => {
                // Degrade to a miss so the rest of the chain still answers.
                tracing::warn!(path = %path, error = %e, "Store lookup failed");
                metrics::record_store_error();
                None
            }
        }
    }
}
