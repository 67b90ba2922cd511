use std::future::Future;

use reqwest::{Client, header::USER_AGENT};

use crate::{Res, config};

use super::{CachePolicy, ChartCache, ChartKey};

/// The chart provider blocks clients that do not look like a browser.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0";

/// Network side of the fetcher: downloads the raw page for a month.
pub trait ChartSource {
    fn download(&self, key: &ChartKey) -> impl Future<Output = Res<String>>;
}

/// Downloads Hot 100 pages from billboard.com (or `CHART_URL`).
pub struct BillboardSource {
    client: Client,
    base_url: String,
}

impl BillboardSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::chart_url())
    }

    /// e.g. `https://www.billboard.com/charts/hot-100/2024-05-01/`
    pub fn chart_url(&self, key: &ChartKey) -> String {
        format!(
            "{base}/{date}/",
            base = self.base_url.trim_end_matches('/'),
            date = key.first_day().format("%Y-%m-%d")
        )
    }
}

impl ChartSource for BillboardSource {
    async fn download(&self, key: &ChartKey) -> Res<String> {
        let response = self
            .client
            .get(self.chart_url(key))
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

/// Raw chart markup and where it came from.
#[derive(Debug, Clone)]
pub struct ChartPage {
    pub markup: String,
    pub cached: bool,
}

/// Cache-first chart fetcher.
///
/// A cache hit never touches the source. A miss downloads the page once and
/// stores it under the month key before returning it.
pub struct ChartFetcher<S> {
    cache: ChartCache,
    source: S,
    policy: CachePolicy,
}

impl<S: ChartSource> ChartFetcher<S> {
    pub fn new(cache: ChartCache, source: S, policy: CachePolicy) -> Self {
        Self {
            cache,
            source,
            policy,
        }
    }

    /// Returns the page for `key`, from the cache when the policy allows it.
    ///
    /// # Arguments
    ///
    /// * `key` - Month of the chart to fetch
    ///
    /// # Returns
    ///
    /// The markup, with `cached` set when it came from the cache.
    ///
    /// # Errors
    ///
    /// Fails if the cache cannot be read, the download fails, or the
    /// downloaded page cannot be stored.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fetcher = ChartFetcher::new(cache, BillboardSource::from_config(), CachePolicy::Trust);
    /// let page = fetcher.fetch(&"2024-05".parse()?).await?;
    /// ```
    pub async fn fetch(&self, key: &ChartKey) -> Res<ChartPage> {
        if let Some(markup) = self.cache.load(key, self.policy).await? {
            return Ok(ChartPage {
                markup,
                cached: true,
            });
        }

        let markup = self.source.download(key).await?;
        self.cache.store(key, &markup).await?;

        Ok(ChartPage {
            markup,
            cached: false,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
