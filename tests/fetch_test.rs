use std::{cell::Cell, time::Duration};

use chartcli::{
    Res,
    chart::{BillboardSource, CachePolicy, ChartCache, ChartFetcher, ChartKey, ChartSource},
};
use tempfile::TempDir;

// Stands in for the chart provider and counts how often it is hit.
struct CountingSource {
    calls: Cell<usize>,
}

impl CountingSource {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl ChartSource for CountingSource {
    async fn download(&self, key: &ChartKey) -> Res<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(format!("<html><body>chart {key} #{}</body></html>", self.calls.get()))
    }
}

struct FailingSource;

impl ChartSource for FailingSource {
    async fn download(&self, _key: &ChartKey) -> Res<String> {
        Err("connection refused".into())
    }
}

fn key(s: &str) -> ChartKey {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let fetcher = ChartFetcher::new(
        ChartCache::new(dir.path()),
        CountingSource::new(),
        CachePolicy::Trust,
    );

    let first = fetcher.fetch(&key("2024-05")).await.unwrap();
    let second = fetcher.fetch(&key("2024-05")).await.unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.markup, second.markup);
    assert_eq!(fetcher.source().calls.get(), 1);
}

#[tokio::test]
async fn test_cache_hit_never_calls_source() {
    let dir = TempDir::new().unwrap();
    let cache = ChartCache::new(dir.path());
    cache.store(&key("1999-12"), "<html>cached</html>").await.unwrap();

    let fetcher = ChartFetcher::new(cache, FailingSource, CachePolicy::Trust);
    let page = fetcher.fetch(&key("1999-12")).await.unwrap();

    assert!(page.cached);
    assert_eq!(page.markup, "<html>cached</html>");
}

#[tokio::test]
async fn test_months_are_cached_separately() {
    let dir = TempDir::new().unwrap();
    let fetcher = ChartFetcher::new(
        ChartCache::new(dir.path()),
        CountingSource::new(),
        CachePolicy::Trust,
    );

    let may = fetcher.fetch(&key("2024-05")).await.unwrap();
    let june = fetcher.fetch(&key("2024-06")).await.unwrap();

    assert!(!may.cached && !june.cached);
    assert_ne!(may.markup, june.markup);
    assert!(dir.path().join("2024-05.html").is_file());
    assert!(dir.path().join("2024-06.html").is_file());
}

#[tokio::test]
async fn test_refresh_policy_downloads_again_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let cache = ChartCache::new(dir.path());
    cache.store(&key("2024-05"), "stale").await.unwrap();

    let fetcher = ChartFetcher::new(cache, CountingSource::new(), CachePolicy::Refresh);
    let page = fetcher.fetch(&key("2024-05")).await.unwrap();

    assert!(!page.cached);
    let stored = std::fs::read_to_string(dir.path().join("2024-05.html")).unwrap();
    assert_eq!(stored, page.markup);
    assert_ne!(stored, "stale");
}

#[tokio::test]
async fn test_max_age_policy() {
    let dir = TempDir::new().unwrap();
    let cache = ChartCache::new(dir.path());
    cache.store(&key("2024-05"), "fresh").await.unwrap();

    let loaded = cache
        .load(&key("2024-05"), CachePolicy::MaxAge(Duration::from_secs(3600)))
        .await
        .unwrap();
    assert_eq!(loaded.as_deref(), Some("fresh"));

    tokio::time::sleep(Duration::from_millis(20)).await;
    let expired = cache
        .load(&key("2024-05"), CachePolicy::MaxAge(Duration::from_millis(1)))
        .await
        .unwrap();
    assert!(expired.is_none());
}

#[tokio::test]
async fn test_download_failure_is_not_cached() {
    let dir = TempDir::new().unwrap();
    let fetcher = ChartFetcher::new(ChartCache::new(dir.path()), FailingSource, CachePolicy::Trust);

    assert!(fetcher.fetch(&key("2024-05")).await.is_err());
    assert!(!dir.path().join("2024-05.html").exists());
}

#[tokio::test]
async fn test_cache_entries_remove_and_clear() {
    let dir = TempDir::new().unwrap();
    let cache = ChartCache::new(dir.path());
    assert!(cache.entries().await.unwrap().is_empty());

    cache.store(&key("2024-06"), "june").await.unwrap();
    cache.store(&key("2024-05"), "may!").await.unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let entries = cache.entries().await.unwrap();
    let months: Vec<String> = entries.iter().map(|c| c.key.to_string()).collect();
    assert_eq!(months, vec!["2024-05", "2024-06"]);
    assert_eq!(entries[0].bytes, 4);

    assert!(cache.remove(&key("2024-05")).await.unwrap());
    assert!(!cache.remove(&key("2024-05")).await.unwrap());

    assert_eq!(cache.clear().await.unwrap(), 1);
    assert!(cache.entries().await.unwrap().is_empty());
    assert!(dir.path().join("notes.txt").exists());
}

#[test]
fn test_billboard_url_uses_first_day_of_month() {
    let source = BillboardSource::new("https://www.billboard.com/charts/hot-100/");
    assert_eq!(
        source.chart_url(&key("2024-05")),
        "https://www.billboard.com/charts/hot-100/2024-05-01/"
    );
}
