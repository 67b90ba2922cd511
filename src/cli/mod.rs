//! # CLI Module
//!
//! User-facing commands. Each command reports progress through the crate's
//! output macros and terminates with [`crate::error!`] on fatal errors.
//!
//! - [`auth`] - Runs the Spotify authorization flow
//! - [`build`] - Builds the playlist for a month's chart
//! - [`chart`] - Prints a month's chart without touching Spotify
//! - [`list_cache`] / [`clear_cache`] - Inspect or empty the chart cache
//!
//! ```bash
//! chartcli auth                          # Authorize once
//! chartcli build --month 2024-05         # Build "2024-05 Billboard Top 100"
//! chartcli build                         # Prompt for the month
//! chartcli chart --month 1999-12         # Show the parsed chart
//! chartcli cache clear --month 1999-12   # Drop one cached page
//! ```

mod auth;
mod build;
mod cache;
mod chart;

pub use auth::auth;
pub use build::build;
pub use cache::{clear_cache, list_cache};
pub use chart::chart;

use std::io;

use crate::{
    Res,
    chart::{
        BillboardSource, CachePolicy, ChartCache, ChartEntry, ChartFetcher, ChartKey,
        ParseStrategy, parse,
    },
    info, success, utils,
};

/// Month from `--month`, or asked for interactively when absent.
fn chart_key(month: Option<String>) -> Res<ChartKey> {
    match month {
        Some(month) => Ok(month.parse::<ChartKey>()?),
        None => utils::prompt_chart_key(&mut io::stdin().lock(), &mut io::stdout()),
    }
}

fn parse_strategy(legacy_stride: bool) -> ParseStrategy {
    if legacy_stride {
        ParseStrategy::legacy()
    } else {
        ParseStrategy::Rows
    }
}

/// Fetches (cache first) and parses the chart for `key`.
async fn load_chart(key: &ChartKey, refresh: bool, legacy_stride: bool) -> Res<Vec<ChartEntry>> {
    let fetcher = ChartFetcher::new(
        ChartCache::default_location(),
        BillboardSource::from_config(),
        CachePolicy::from_config(refresh),
    );

    let page = fetcher.fetch(key).await?;
    if page.cached {
        info!("Using cached chart page for {}", key);
    } else {
        success!("Downloaded chart page for {}", key);
    }

    let entries = parse(&page.markup, parse_strategy(legacy_stride))?;
    success!("Parsed {} chart entries", entries.len());
    Ok(entries)
}
