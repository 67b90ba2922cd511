use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog::{self, MissPolicy, Session},
    error, info,
    spotify::SpotifySession,
    success,
    types::ChartTableRow,
    warning,
};

use super::{chart_key, load_chart};

pub async fn build(month: Option<String>, strict: bool, refresh: bool, legacy_stride: bool) {
    let key = match chart_key(month) {
        Ok(key) => key,
        Err(e) => error!("Invalid month: {}", e),
    };

    let entries = match load_chart(&key, refresh, legacy_stride).await {
        Ok(entries) => entries,
        Err(e) => error!("Failed to load chart for {}: {}", key, e),
    };

    let session = match SpotifySession::open().await {
        Ok(session) => session,
        Err(e) => error!("Failed to open Spotify session: {}", e),
    };

    info!("Searching Spotify for {} tracks", entries.len());
    let policy = if strict {
        MissPolicy::Abort
    } else {
        MissPolicy::Skip
    };

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let resolution = match catalog::resolve(&session, &entries, policy, &pb).await {
        Ok(resolution) => {
            pb.finish_and_clear();
            resolution
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to resolve chart entries: {}", e)
        }
    };

    let refs = resolution.found();
    success!("Found {} of {} tracks", refs.len(), resolution.len());

    if !resolution.missed().is_empty() {
        warning!(
            "{} chart entries had no match and were skipped:",
            resolution.missed().len()
        );
        let rows: Vec<ChartTableRow> = resolution
            .missed()
            .iter()
            .map(|e| ChartTableRow {
                rank: e.rank,
                track: e.track.clone(),
                artist: e.artist.clone(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    let playlist_name = catalog::playlist_name(&key);
    let playlist_id =
        match catalog::ensure_playlist(&session, session.user_id(), &playlist_name).await {
            Ok(id) => id,
            Err(e) => error!("Failed to find or create playlist {}: {}", playlist_name, e),
        };

    if let Err(e) = catalog::add_tracks(&session, &playlist_id, &refs).await {
        error!("Failed to add tracks to playlist {}: {}", playlist_name, e);
    }

    success!("Added {} tracks to playlist {}", refs.len(), playlist_name);
}
