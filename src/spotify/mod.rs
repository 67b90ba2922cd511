//! # Spotify Integration Module
//!
//! The Spotify Web API side of the application: the OAuth 2.0 PKCE flow and
//! the [`SpotifySession`] that implements [`crate::catalog::Session`].
//!
//! ```text
//! CLI
//!  ↓
//! catalog::{resolve, ensure_playlist, add_tracks}
//!  ↓
//! SpotifySession ── TokenManager ── auth (PKCE, refresh)
//!  ↓
//! reqwest → Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - Id of the authenticated user
//! - `GET /search?type=track` - Catalog lookup per chart entry
//! - `GET /users/{user_id}/playlists` - Every page of the user's playlists
//! - `POST /users/{user_id}/playlists` - Create the chart playlist
//! - `POST /playlists/{playlist_id}/tracks` - Append track URIs, 100 per request
//! - `POST /api/token` - Code exchange and token refresh
//!
//! Calls are made one at a time and are never retried; every non-success
//! status is returned as an error through `error_for_status`.

pub mod auth;
mod session;

pub use session::{SpotifySession, TRACKS_PER_REQUEST};
