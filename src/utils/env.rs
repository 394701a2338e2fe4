//! Environment variable utilities
//!
//! Provides helpers for reading environment variables used in directory discovery.

use std::path::PathBuf;

/// Get environment variable as Option
///
/// Returns `Some(value)` if set, `None` if not set.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get environment variable as a path
///
/// Empty values are treated as unset, matching how XDG variables are interpreted.
pub fn env_path(key: &str) -> Option<PathBuf> {
    env_opt(key)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
