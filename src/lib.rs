//! albumradar library
//!
//! Reads the user's Spotify "Release Radar", keeps the tracks that belong to
//! full-length albums and republishes those albums in full as the playlist
//! "New Album Releases", replacing the one from the previous run.
//!
//! # Modules
//!
//! - `api` - HTTP endpoint for the OAuth redirect
//! - `cli` - Command implementations
//! - `config` - Environment and `.env` configuration
//! - `error` - Error type shared by all modules
//! - `management` - Token cache and refresh
//! - `radar` - The locate/filter/expand/publish pipeline
//! - `server` - Local HTTP server for the OAuth redirect
//! - `spotify` - Spotify Web API client and authorization flow
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod radar;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Found {} albums", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits with status 1.
///
/// Only meant for the command layer. Library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to create playlist: {}", e);
/// // Program exits here
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
/// For problems that do not stop the run, such as data that was cut off at a
/// page limit.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
