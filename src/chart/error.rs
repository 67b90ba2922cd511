use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartKeyError {
    #[error("'{0}' is not in YYYY-MM format")]
    Format(String),

    #[error("year {0} is not a 4-digit year")]
    Year(i32),

    #[error("month {0} is not between 1 and 12")]
    Month(u32),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("no chart entries found, the page layout may have changed")]
    NoEntries,

    #[error("found {tracks} track titles but {artists} artist names")]
    CountMismatch { tracks: usize, artists: usize },

    #[error("no artist found for rank {rank} ('{track}')")]
    MissingArtist { rank: usize, track: String },

    #[error("artist node stride must be at least 1")]
    InvalidStride,
}
