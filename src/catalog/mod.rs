//! # Catalog Module
//!
//! Resolution of chart entries against the streaming catalog and playlist
//! management. Both work against the [`Session`] trait so they can be driven
//! by the real Spotify client or by a stub.
//!
//! - [`session`] - The capability object every catalog call goes through
//! - [`resolve`] - One search per chart entry, in chart order
//! - [`playlist`] - Find-or-create a playlist and append references

pub mod playlist;
pub mod resolve;
pub mod session;

use thiserror::Error;

pub use playlist::{add_tracks, ensure_playlist, playlist_name};
pub use resolve::{MissPolicy, Resolution, resolve, search_query};
pub use session::Session;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no catalog match for rank {rank}: '{track}' by {artist}")]
    NoMatch {
        rank: usize,
        track: String,
        artist: String,
    },
}
