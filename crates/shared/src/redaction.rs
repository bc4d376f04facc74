//! Secret detection and redaction for env keys.
//!
//! Raw environment values end up in error messages, logs and printed
//! configs. Anything read from a key that looks like a credential is swapped
//! for [`REDACTED`] before it leaves the process.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

const SECRET_MARKERS: [&str; 6] = ["KEY", "TOKEN", "SECRET", "PASSWORD", "CREDENTIAL", "AUTH"];

/// Checks if an env key likely names a secret (case-insensitive).
///
/// ```
/// use envsure_shared::is_secret_key;
///
/// assert!(is_secret_key("AWS_SECRET"));
/// assert!(is_secret_key("api_key"));
/// assert!(!is_secret_key("DATABASE_NAME"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Returns the value unchanged, or [`REDACTED`] when `key` looks secret.
pub fn redact_for_key<'a>(key: &str, value: &'a str) -> &'a str {
    if is_secret_key(key) { REDACTED } else { value }
}
