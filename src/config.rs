//! Configuration management for the chart playlist builder.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify credentials are required; every endpoint
//! and path has a default that can be overridden.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file found from the working directory upward
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::Res;

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SCOPE: &str = "playlist-modify-public";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_CHART_URL: &str = "https://www.billboard.com/charts/hot-100";

/// Loads environment variables from `.env` files.
///
/// Reads `{data_dir}/.env` first and then the nearest `.env` from the working
/// directory upward. Neither file has to exist; variables that are already
/// set in the process environment are never overwritten.
///
/// # Directory Structure
///
/// The data directory defaults to:
/// - Linux: `~/.local/share/chartcli`
/// - macOS: `~/Library/Application Support/chartcli`
/// - Windows: `%LOCALAPPDATA%/chartcli`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("Failed to load .env: {}", e).into()),
    }
}

fn required(name: &str) -> Res<String> {
    env::var(name).map_err(|_| format!("{name} must be set").into())
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Root directory for the token cache, the chart cache and the `.env` file.
///
/// `CHARTCLI_DATA_DIR` overrides the platform default.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("CHARTCLI_DATA_DIR") {
        return PathBuf::from(dir);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chartcli");
    path
}

/// Address the local OAuth callback server binds to.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the optional Spotify client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// The PKCE flow works without it; when present it is sent along with the
/// token exchange and refresh requests.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_CLIENT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Returns the OAuth redirect URI (`SPOTIFY_REDIRECT_URI`).
///
/// Must match the redirect URI registered in the Spotify application settings,
/// e.g. `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> Res<String> {
    required("SPOTIFY_REDIRECT_URI")
}

/// Path component of the redirect URI, used as the callback route.
pub fn callback_path() -> String {
    spotify_redirect_uri()
        .ok()
        .and_then(|uri| Url::parse(&uri).ok())
        .map(|url| url.path().to_string())
        .filter(|path| path.len() > 1)
        .unwrap_or_else(|| "/callback".to_string())
}

/// Pre-issued access token (`SPOTIFY_ACCESS_TOKEN`).
///
/// When set, it is used as the bearer token as-is and the authorization flow
/// is skipped. It is not refreshed.
pub fn spotify_access_token() -> Option<String> {
    env::var("SPOTIFY_ACCESS_TOKEN")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Scope requested during authorization.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Spotify OAuth authorization endpoint.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Spotify OAuth token endpoint.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Base URL of the chart provider; the month's first day is appended to it.
pub fn chart_url() -> String {
    var_or("CHART_URL", DEFAULT_CHART_URL)
}

/// Maximum age of a cached chart page (`CHART_CACHE_MAX_AGE_DAYS`).
///
/// `None` when unset or not a positive number: cached pages never expire.
pub fn chart_cache_max_age() -> Option<Duration> {
    env::var("CHART_CACHE_MAX_AGE_DAYS")
        .ok()
        .and_then(|days| days.trim().parse::<u64>().ok())
        .filter(|days| *days > 0)
        .map(|days| Duration::from_secs(days * 24 * 60 * 60))
}
