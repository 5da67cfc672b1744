//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;
use url_redirector::config::RedirectorConfig;
use url_redirector::http::HttpServer;
use url_redirector::lifecycle::Shutdown;
use url_redirector::routing::{PathEntry, ResolverChain};
use url_redirector::storage::{PathStore, DEFAULT_TABLE};

/// Serve `chain` on an ephemeral local port.
///
/// Returns the bound address and the coordinator that stops the server.
pub async fn start_server(chain: ResolverChain) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&RedirectorConfig::default(), chain);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Open a store under `dir` and seed it with `entries`.
#[allow(dead_code)]
pub fn seeded_store(dir: &Path, entries: &[(&str, &str)]) -> PathStore {
    let store = PathStore::open(dir.join("paths.db"), DEFAULT_TABLE).unwrap();
    let entries: Vec<PathEntry> = entries.iter().map(|(p, u)| PathEntry::new(*p, *u)).collect();
    store.seed(&entries).unwrap();
    store
}
