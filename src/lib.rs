//! Billboard Chart Playlist CLI Library
//!
//! This library turns a monthly Billboard Hot 100 chart into a Spotify playlist.
//! It fetches the chart page (through a local cache), parses the track and
//! artist names, resolves each pair against the Spotify catalog and appends the
//! results to a playlist owned by the authenticated user.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `catalog` - Catalog resolution and playlist management over a `Session`
//! - `chart` - Chart keys, fetching, caching and parsing
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token persistence and refresh
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use chartcli::{chart, config};
//!
//! #[tokio::main]
//! async fn main() -> chartcli::Res<()> {
//!     config::load_env().await?;
//!     let key: chart::ChartKey = "2024-05".parse()?;
//!     // Fetch, parse, resolve...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. Domain errors such as
/// [`chart::ChartError`] convert into it through `?`.
///
/// # Example
///
/// ```
/// use chartcli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching chart for {}", key);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 after printing. Only used for
/// fatal errors at the command layer; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. chart entries that had no catalog match.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
