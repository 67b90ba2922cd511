use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use futures::StreamExt;

use crate::{Res, config};

use super::ChartKey;

const CACHE_EXTENSION: &str = "html";

/// When a cached chart page may be served instead of downloading it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// A stored page is valid forever.
    #[default]
    Trust,
    /// A stored page older than this (by modification time) is re-fetched.
    MaxAge(Duration),
    /// Always re-fetch and overwrite the stored page.
    Refresh,
}

impl CachePolicy {
    /// Policy from configuration: `MaxAge` if `CHART_CACHE_MAX_AGE_DAYS` is
    /// set, otherwise `Trust`. `refresh` wins over both.
    pub fn from_config(refresh: bool) -> Self {
        if refresh {
            return CachePolicy::Refresh;
        }
        config::chart_cache_max_age()
            .map(CachePolicy::MaxAge)
            .unwrap_or_default()
    }
}

/// A page stored in the cache, as reported by [`ChartCache::entries`].
#[derive(Debug, Clone)]
pub struct CachedChart {
    pub key: ChartKey,
    pub bytes: u64,
    pub saved_at: SystemTime,
}

/// Key-addressed store of raw chart pages, one file per month.
pub struct ChartCache {
    dir: PathBuf,
}

impl ChartCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `{data_dir}/charts`
    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("charts"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &ChartKey) -> PathBuf {
        self.dir.join(format!("{key}.{CACHE_EXTENSION}"))
    }

    /// Returns the stored page for `key` if the policy allows serving it.
    pub async fn load(&self, key: &ChartKey, policy: CachePolicy) -> Res<Option<String>> {
        let path = self.path_for(key);

        match policy {
            CachePolicy::Refresh => return Ok(None),
            CachePolicy::MaxAge(max_age) => {
                let metadata = match async_fs::metadata(&path).await {
                    Ok(metadata) => metadata,
                    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                    Err(e) => return Err(e.into()),
                };
                let age = SystemTime::now()
                    .duration_since(metadata.modified()?)
                    .unwrap_or_default();
                if age > max_age {
                    return Ok(None);
                }
            }
            CachePolicy::Trust => {}
        }

        match async_fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stores `markup` under `key`, replacing any previous page.
    pub async fn store(&self, key: &ChartKey, markup: &str) -> Res<()> {
        async_fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{CACHE_EXTENSION}.tmp"));
        async_fs::write(&tmp, markup).await?;
        async_fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Lists stored pages, oldest chart first. Unrelated files are ignored.
    pub async fn entries(&self) -> Res<Vec<CachedChart>> {
        let mut dir = match async_fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut charts = Vec::new();
        while let Some(entry) = dir.next().await {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CACHE_EXTENSION) {
                continue;
            }
            let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<ChartKey>().ok())
            else {
                continue;
            };

            let metadata = entry.metadata().await?;
            charts.push(CachedChart {
                key,
                bytes: metadata.len(),
                saved_at: metadata.modified()?,
            });
        }

        charts.sort_by_key(|chart| chart.key);
        Ok(charts)
    }

    /// Removes the page for `key`. Returns `false` if nothing was stored.
    pub async fn remove(&self, key: &ChartKey) -> Res<bool> {
        match async_fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes every stored page and returns how many were removed.
    pub async fn clear(&self) -> Res<usize> {
        let mut removed = 0;
        for chart in self.entries().await? {
            if self.remove(&chart.key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
