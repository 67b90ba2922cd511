//! Extraction of chart entries from Hot 100 markup.
//!
//! On the observed layout every chart row is a nested list; the track title is
//! an `h3` inside `div ul li ul li`, and the artist name is the first `span`
//! next to it in the same list item. The row's other columns (last week, peak,
//! weeks on chart, ...) are also `span`s under the same path, which is why the
//! legacy strategy has to stride through the flat span list.

use scraper::{ElementRef, Html, Selector};

use super::ChartError;

const TRACK_SELECTOR: &str = "div ul li ul li h3";
const ARTIST_SELECTOR: &str = "div ul li ul li span";
const ROW_ARTIST_SELECTOR: &str = "span";

/// Number of `span` nodes per chart row on the legacy layout; the artist name
/// is the first of them.
pub const ARTIST_NODE_STRIDE: usize = 7;

/// How artist nodes are paired with track titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStrategy {
    /// Take the first `span` inside each title's own list item.
    #[default]
    Rows,
    /// Take every n-th `span` of the whole document, starting at the first.
    Stride(usize),
}

impl ParseStrategy {
    pub fn legacy() -> Self {
        ParseStrategy::Stride(ARTIST_NODE_STRIDE)
    }
}

/// One chart row. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub rank: usize,
    pub track: String,
    pub artist: String,
}

fn selector(css: &str) -> Result<Selector, ChartError> {
    Selector::parse(css).map_err(|e| ChartError::Selector(format!("{css}: {e:?}")))
}

fn node_text(node: ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Parses chart markup into entries in rank order.
pub fn parse(markup: &str, strategy: ParseStrategy) -> Result<Vec<ChartEntry>, ChartError> {
    let document = Html::parse_document(markup);
    let track_selector = selector(TRACK_SELECTOR)?;

    let entries = match strategy {
        ParseStrategy::Rows => parse_rows(&document, &track_selector)?,
        ParseStrategy::Stride(stride) => parse_stride(&document, &track_selector, stride)?,
    };

    if entries.is_empty() {
        return Err(ChartError::NoEntries);
    }
    Ok(entries)
}

fn parse_rows(document: &Html, track_selector: &Selector) -> Result<Vec<ChartEntry>, ChartError> {
    let artist_selector = selector(ROW_ARTIST_SELECTOR)?;

    document
        .select(track_selector)
        .enumerate()
        .map(|(idx, title)| -> Result<ChartEntry, ChartError> {
            let rank = idx + 1;
            let track = node_text(title);
            let artist = title
                .parent()
                .and_then(ElementRef::wrap)
                .and_then(|row| row.select(&artist_selector).next())
                .map(node_text)
                .ok_or_else(|| ChartError::MissingArtist {
                    rank,
                    track: track.clone(),
                })?;

            Ok(ChartEntry {
                rank,
                track,
                artist,
            })
        })
        .collect()
}

fn parse_stride(
    document: &Html,
    track_selector: &Selector,
    stride: usize,
) -> Result<Vec<ChartEntry>, ChartError> {
    if stride == 0 {
        return Err(ChartError::InvalidStride);
    }
    let artist_selector = selector(ARTIST_SELECTOR)?;

    let tracks: Vec<String> = document.select(track_selector).map(node_text).collect();
    let artists: Vec<String> = document
        .select(&artist_selector)
        .step_by(stride)
        .map(node_text)
        .collect();

    if tracks.len() != artists.len() {
        return Err(ChartError::CountMismatch {
            tracks: tracks.len(),
            artists: artists.len(),
        });
    }

    Ok(tracks
        .into_iter()
        .zip(artists)
        .enumerate()
        .map(|(idx, (track, artist))| ChartEntry {
            rank: idx + 1,
            track,
            artist,
        })
        .collect())
}
