//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the static table from configuration
//! - Read and decode the rule file
//! - Open and seed the persistent store
//! - Assemble the resolver chain in fallback order

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ConfigError, RedirectorConfig};
use crate::observability::metrics;
use crate::routing::{MappingTable, ResolverChain};
use crate::rules::{self, RuleError};
use crate::storage::{PathStore, StoreError, StoreResolver};

/// Fatal errors raised before the first request is served.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to read rules file {}: {source}", .path.display())]
    RulesUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid rules file {}: {source}", .path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: RuleError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything startup hands to the serving phase.
#[derive(Debug)]
pub struct Startup {
    /// The complete, immutable chain.
    pub chain: ResolverChain,

    /// Owner's store handle, closed after the server drains.
    pub store: PathStore,
}

/// Build the resolver chain: store, then rule file, then static routes.
///
/// On error every resource acquired so far is released before returning.
pub fn assemble(config: &RedirectorConfig) -> Result<Startup, StartupError> {
    let static_table = MappingTable::from_entries(config.static_routes.iter().cloned()).with_name("static");
    metrics::record_table_size("static", static_table.len());

    let rules_path = PathBuf::from(&config.rules.file);
    let raw = fs::read(&rules_path).map_err(|source| StartupError::RulesUnreadable {
        path: rules_path.clone(),
        source,
    })?;
    let rules_table = rules::load(&rules_path, &raw)
        .map_err(|source| StartupError::Rules {
            path: rules_path.clone(),
            source,
        })?
        .with_name("rules");
    metrics::record_table_size("rules", rules_table.len());

    tracing::info!(
        file = %rules_path.display(),
        entries = rules_table.len(),
        "Rules loaded"
    );

    let store = PathStore::open(&config.store.path, &config.store.table)?;
    store.seed(&config.store.seed)?;

    let chain = ResolverChain::default()
        .then(StoreResolver::new(store.clone()))
        .then(rules_table)
        .then(static_table);

    tracing::info!(resolvers = ?chain.names(), "Resolver chain assembled");

    Ok(Startup { chain, store })
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::Path;

    fn config_in(dir: &Path, rules_name: &str, rules: &str) -> RedirectorConfig {
        let rules_path = dir.join(rules_name);
        fs::write(&rules_path, rules).unwrap();

        let mut config = RedirectorConfig::default();
        config.rules.file = rules_path.to_string_lossy().into_owned();
        config.store.path = dir.join("paths.db").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_chain_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "rules.yaml", "- path: /github\n  url: http://github.com\n");

        let startup = assemble(&config).unwrap();
        assert_eq!(startup.chain.names(), vec!["store", "rules", "static"]);

        let apple = startup.chain.resolve("/apple").unwrap();
        assert_eq!((apple.source, &*apple.url), ("store", "http://www.apple.com"));

        let github = startup.chain.resolve("/github").unwrap();
        assert_eq!(github.source, "rules");

        let godoc = startup.chain.resolve("/yaml-godoc").unwrap();
        assert_eq!(godoc.source, "static");

        assert!(startup.chain.resolve("/unknown").is_none());
    }

    #[test]
    fn test_store_shadows_rules() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "rules.json", r#"[{"path":"/apple","url":"http://not-apple"}]"#);

        let startup = assemble(&config).unwrap();
        assert_eq!(startup.chain.resolve("/apple").unwrap().url, "http://www.apple.com");
    }

    #[test]
    fn test_missing_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RedirectorConfig::default();
        config.rules.file = dir.path().join("absent.yaml").to_string_lossy().into_owned();
        config.store.path = dir.path().join("paths.db").to_string_lossy().into_owned();

        let err = assemble(&config).unwrap_err();
        assert!(matches!(err, StartupError::RulesUnreadable { .. }));
        // The store is opened after the rules, so nothing was created
        assert!(!dir.path().join("paths.db").exists());
    }

    #[test]
    fn test_bad_rules_are_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let config = config_in(dir.path(), "rules.txt", "[]");
        let err = assemble(&config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Rules { source: RuleError::UnsupportedFormat { .. }, .. }
        ));

        let config = config_in(dir.path(), "rules.yaml", "- path: [oops");
        let err = assemble(&config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Rules { source: RuleError::MalformedInput { .. }, .. }
        ));
    }

    #[test]
    fn test_store_unavailable_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "rules.yaml", "[]");
        config.store.path = dir.path().join("missing").join("paths.db").to_string_lossy().into_owned();

        let err = assemble(&config).unwrap_err();
        assert!(matches!(err, StartupError::Store(StoreError::Unavailable { .. })));
    }

    #[test]
    fn test_store_released_after_drop() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "rules.yaml", "[]");

        let Startup { chain, store } = assemble(&config).unwrap();
        drop(chain);
        store.close();

        // The file can be attached again once every handle is gone
        let startup = assemble(&config).unwrap();
        assert_eq!(startup.store.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_table_sizes_reach_exporter() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "rules.yaml", "- path: /github\n  url: http://github.com\n");

        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        ::metrics::with_local_recorder(&recorder, || assemble(&config)).unwrap();

        let rendered = handle.render();
        assert!(rendered.contains("redirector_mapping_entries{source=\"static\"} 2"));
        assert!(rendered.contains("redirector_mapping_entries{source=\"rules\"} 1"));
    }
}
