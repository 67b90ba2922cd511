use indicatif::ProgressBar;

use crate::{Res, chart::ChartEntry, types::CatalogRef};

use super::{CatalogError, Session};

/// What to do when a search returns no results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Leave the entry out and report it in [`Resolution::missed`].
    #[default]
    Skip,
    /// Fail the whole resolution on the first miss.
    Abort,
}

/// Outcome of resolving a chart, aligned with the input entries.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    slots: Vec<Option<CatalogRef>>,
    missed: Vec<ChartEntry>,
}

impl Resolution {
    /// One slot per input entry, in input order.
    pub fn slots(&self) -> &[Option<CatalogRef>] {
        &self.slots
    }

    /// The resolved references in chart order.
    pub fn found(&self) -> Vec<CatalogRef> {
        self.slots.iter().flatten().cloned().collect()
    }

    /// Entries that had no catalog match, in chart order.
    pub fn missed(&self) -> &[ChartEntry] {
        &self.missed
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

pub fn search_query(entry: &ChartEntry) -> String {
    format!("track:{} artist:{}", entry.track, entry.artist)
}

/// Looks up every entry sequentially and takes the first search hit.
///
/// # Arguments
///
/// * `session` - Catalog session to search with
/// * `entries` - Chart entries in rank order
/// * `policy` - Whether a miss is skipped or aborts the resolution
/// * `progress` - Advanced once per entry; pass `ProgressBar::hidden()` when
///   no output is wanted
///
/// # Returns
///
/// A [`Resolution`] with one slot per entry, in the same order.
///
/// # Errors
///
/// Returns the session's error for a failed search, or
/// [`CatalogError::NoMatch`] for the first miss under [`MissPolicy::Abort`].
///
/// # Example
///
/// ```ignore
/// let resolution = resolve(&session, &entries, MissPolicy::Skip, &ProgressBar::hidden()).await?;
/// let refs = resolution.found();
/// ```
pub async fn resolve<S: Session>(
    session: &S,
    entries: &[ChartEntry],
    policy: MissPolicy,
    progress: &ProgressBar,
) -> Res<Resolution> {
    let mut resolution = Resolution {
        slots: Vec::with_capacity(entries.len()),
        missed: Vec::new(),
    };

    for entry in entries {
        progress.set_message(format!("#{} {} - {}", entry.rank, entry.track, entry.artist));
        let hit = session
            .search_tracks(&search_query(entry))
            .await?
            .into_iter()
            .next()
            .map(|track| track.catalog_ref());

        if hit.is_none() {
            match policy {
                MissPolicy::Abort => {
                    return Err(CatalogError::NoMatch {
                        rank: entry.rank,
                        track: entry.track.clone(),
                        artist: entry.artist.clone(),
                    }
                    .into());
                }
                MissPolicy::Skip => resolution.missed.push(entry.clone()),
            }
        }

        resolution.slots.push(hit);
        progress.inc(1);
    }

    Ok(resolution)
}
