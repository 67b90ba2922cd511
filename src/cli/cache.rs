use chrono::{DateTime, Local};
use tabled::Table;

use crate::{
    chart::{ChartCache, ChartKey},
    error, info, success,
    types::CachedChartTableRow,
    utils,
};

pub async fn list_cache() {
    let cache = ChartCache::default_location();
    let charts = match cache.entries().await {
        Ok(charts) => charts,
        Err(e) => error!("Failed to read chart cache: {}", e),
    };

    if charts.is_empty() {
        info!("No cached chart pages in {}", cache.dir().display());
        return;
    }

    let rows: Vec<CachedChartTableRow> = charts
        .into_iter()
        .map(|c| CachedChartTableRow {
            month: c.key.to_string(),
            size: utils::format_bytes(c.bytes),
            saved: DateTime::<Local>::from(c.saved_at)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub async fn clear_cache(month: Option<String>) {
    let cache = ChartCache::default_location();

    let Some(month) = month else {
        match cache.clear().await {
            Ok(removed) => success!("Removed {} cached chart pages", removed),
            Err(e) => error!("Failed to clear chart cache: {}", e),
        }
        return;
    };

    let key = match month.parse::<ChartKey>() {
        Ok(key) => key,
        Err(e) => error!("Invalid month: {}", e),
    };

    match cache.remove(&key).await {
        Ok(true) => success!("Removed cached chart page for {}", key),
        Ok(false) => info!("No cached chart page for {}", key),
        Err(e) => error!("Failed to remove cached chart page for {}: {}", key, e),
    }
}
