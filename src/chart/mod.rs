//! # Chart Module
//!
//! Everything needed to turn a year-month into an ordered list of chart
//! entries, without touching the streaming service:
//!
//! ```text
//! ChartKey ("2024-05")
//!     ↓
//! ChartFetcher ── ChartCache ({data_dir}/charts/2024-05.html)
//!     ↓            └─ ChartSource (HTTP GET on a cache miss)
//! parse(markup, ParseStrategy)
//!     ↓
//! Vec<ChartEntry>
//! ```
//!
//! - [`key`] - Validated year-month keys
//! - [`cache`] - Key-addressed store of raw chart pages with a staleness policy
//! - [`fetch`] - Cache-first download of chart pages
//! - [`parse`] - Extraction of (track, artist) pairs from chart markup

pub mod cache;
mod error;
pub mod fetch;
mod key;
pub mod parse;

pub use cache::{CachePolicy, CachedChart, ChartCache};
pub use error::{ChartError, ChartKeyError};
pub use fetch::{BillboardSource, ChartFetcher, ChartPage, ChartSource};
pub use key::ChartKey;
pub use parse::{ARTIST_NODE_STRIDE, ChartEntry, ParseStrategy, parse};
