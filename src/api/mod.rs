//! # API Module
//!
//! HTTP handlers for the local server that receives Spotify's OAuth redirect.
//!
//! - [`callback`] - Completes the PKCE flow by exchanging the authorization
//!   code for an access token and handing it to the waiting auth flow through
//!   the shared state.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use chartcli::api::callback;
//!
//! let app = Router::new().route("/callback", get(callback));
//! ```

mod callback;

pub use callback::callback;
