use tabled::Table;

use crate::{error, types::ChartTableRow};

use super::{chart_key, load_chart};

pub async fn chart(month: Option<String>, refresh: bool, legacy_stride: bool) {
    let key = match chart_key(month) {
        Ok(key) => key,
        Err(e) => error!("Invalid month: {}", e),
    };

    let entries = match load_chart(&key, refresh, legacy_stride).await {
        Ok(entries) => entries,
        Err(e) => error!("Failed to load chart for {}: {}", key, e),
    };

    let rows: Vec<ChartTableRow> = entries
        .into_iter()
        .map(|e| ChartTableRow {
            rank: e.rank,
            track: e.track,
            artist: e.artist,
        })
        .collect();

    println!("{}", Table::new(rows));
}
