//! Environment helpers
//!
//! Treat blank variables the same as unset ones so that an empty line in
//! `.env` never overrides a default.

/// Read an env var, returning `None` when it is unset or only whitespace.
pub fn var_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an env var; unset, blank or unparsable values yield `None`.
pub fn var_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    var_non_empty(key).and_then(|v| v.parse::<T>().ok())
}
