//! End-to-end resolution through a running server.

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use url_redirector::config::RedirectorConfig;
use url_redirector::lifecycle;
use url_redirector::routing::{MappingTable, PathEntry, ResolverChain};
use url_redirector::rules;
use url_redirector::storage::StoreResolver;

mod common;

#[tokio::test]
async fn test_table_then_store_then_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::seeded_store(dir.path(), &[("/b", "Y")]);

    let chain = ResolverChain::default()
        .then(MappingTable::from_entries(vec![PathEntry::new("/a", "X")]).with_name("map"))
        .then(StoreResolver::new(store.clone()));

    let (addr, shutdown) = common::start_server(chain).await;
    let client = common::client();

    let res = client.get(format!("http://{}/a", addr)).send().await.expect("Server unreachable");
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "X");

    let res = client.get(format!("http://{}/b", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "Y");

    let res = client.get(format!("http://{}/c", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello, world!\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_rule_file_resolves_every_declared_path() {
    let raw = br#"[
        {"path": "/github", "url": "http://github.com"},
        {"path": "/rust", "url": "https://www.rust-lang.org"},
        {"path": "/docs", "url": "https://docs.rs"}
    ]"#;
    let declared: Vec<PathEntry> = serde_json::from_slice(raw).unwrap();
    let table = rules::load("rules.json", raw).unwrap();

    let (addr, shutdown) = common::start_server(ResolverChain::default().then(table)).await;
    let client = common::client();

    for entry in declared {
        let res = client.get(format!("http://{}{}", addr, entry.path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "path {}", entry.path);
        assert_eq!(res.headers()[LOCATION], entry.url.as_str());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_every_method_is_redirected() {
    let table = MappingTable::from_entries(vec![PathEntry::new("/go", "http://target")]);
    let (addr, shutdown) = common::start_server(ResolverChain::default().then(table)).await;
    let client = common::client();

    for method in [reqwest::Method::GET, reqwest::Method::POST, reqwest::Method::DELETE] {
        let res = client
            .request(method.clone(), format!("http://{}/go?utm=1", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "method {}", method);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_assembled_service() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = dir.path().join("rules.yml");
    std::fs::write(&rules_path, "- path: /github\n  url: http://github.com\n").unwrap();

    let mut config = RedirectorConfig::default();
    config.rules.file = rules_path.to_string_lossy().into_owned();
    config.store.path = dir.path().join("paths.db").to_string_lossy().into_owned();

    let startup = lifecycle::assemble(&config).unwrap();
    let (addr, shutdown) = common::start_server(startup.chain).await;
    let client = common::client();

    let expectations = [
        ("/apple", "http://www.apple.com"),
        ("/reddit", "http://www.reddit.com"),
        ("/github", "http://github.com"),
        ("/urlshort-godoc", "https://godoc.org/github.com/gophercises/urlshort"),
    ];
    for (path, url) in expectations {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "path {}", path);
        assert_eq!(res.headers()[LOCATION], url);
    }

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    shutdown.trigger();
}
