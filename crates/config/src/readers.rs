//! Primitive parsers turning raw env text into typed values.
//!
//! Parsers never fail the process. Bad input becomes a `Left` carrying a
//! human-readable message that names the key; raw values read from secret
//! keys are redacted before they reach the message.

use crate::schema::{ConfigType, ConfigValue, DEFAULT_LIST_DELIMITER};
use envsure_shared::{Either, redact_for_key};

/// Why a single field failed to read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// Variable is not set.
    #[error("Couldn't read {key} from environment")]
    Missing {
        /// Env key.
        key: String,
    },
    /// Value is not a base-10 integer.
    #[error("{key} must be an integer, got '{value}'")]
    InvalidNumber {
        /// Env key.
        key: String,
        /// Raw value (redacted for secret keys).
        value: String,
    },
    /// Value is not `true` or `false`.
    #[error("{key} must be a boolean (true/false), got '{value}'")]
    InvalidBoolean {
        /// Env key.
        key: String,
        /// Raw value (redacted for secret keys).
        value: String,
    },
    /// Override hook reported a failure.
    #[error("Override for {key} failed: {message}")]
    OverrideFailed {
        /// Env key.
        key: String,
        /// Message returned by the hook.
        message: String,
    },
}

impl ReadError {
    /// Variable `key` is not set.
    pub fn missing(key: &str) -> Self {
        Self::Missing {
            key: key.to_owned(),
        }
    }

    /// `raw` under `key` is not an integer.
    pub fn invalid_number(key: &str, raw: &str) -> Self {
        Self::InvalidNumber {
            key: key.to_owned(),
            value: redact_for_key(key, raw).to_owned(),
        }
    }

    /// `raw` under `key` is not a boolean.
    pub fn invalid_boolean(key: &str, raw: &str) -> Self {
        Self::InvalidBoolean {
            key: key.to_owned(),
            value: redact_for_key(key, raw).to_owned(),
        }
    }

    /// Override for `key` failed with `message`.
    pub fn override_failed(key: &str, message: impl Into<String>) -> Self {
        Self::OverrideFailed {
            key: key.to_owned(),
            message: message.into(),
        }
    }
}

/// Pass the raw value through unchanged.
pub fn parse_string(_key: &str, raw: &str) -> Either<String, String> {
    Either::Right(raw.to_owned())
}

/// Parse a base-10 `i64`, ignoring surrounding whitespace.
pub fn parse_int(key: &str, raw: &str) -> Either<String, i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ReadError::invalid_number(key, raw).to_string())
        .into()
}

/// Parse `true` / `false`, case-insensitive, ignoring surrounding whitespace.
pub fn parse_boolean(key: &str, raw: &str) -> Either<String, bool> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("true") {
        Either::Right(true)
    } else if value.eq_ignore_ascii_case("false") {
        Either::Right(false)
    } else {
        Either::Left(ReadError::invalid_boolean(key, raw).to_string())
    }
}

/// Split on `delimiter`, trimming items and dropping empty ones.
///
/// An empty delimiter falls back to `,`. Parsing never fails.
///
/// ```
/// use envsure_config::parse_list;
/// use envsure_shared::Either;
///
/// assert_eq!(
///     parse_list("AWS_ENABLED_SERVICES", " s3, sqs ,,", ","),
///     Either::Right(vec!["s3".to_owned(), "sqs".to_owned()])
/// );
/// ```
pub fn parse_list(_key: &str, raw: &str, delimiter: &str) -> Either<String, Vec<String>> {
    let delimiter = if delimiter.is_empty() {
        DEFAULT_LIST_DELIMITER
    } else {
        delimiter
    };
    Either::Right(
        raw.split(delimiter)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
    )
}

/// Parse `raw` according to `kind`.
pub fn parse_value(
    kind: ConfigType,
    key: &str,
    raw: &str,
    delimiter: &str,
) -> Either<String, ConfigValue> {
    match kind {
        ConfigType::String => parse_string(key, raw).map(ConfigValue::Text),
        ConfigType::Boolean => parse_boolean(key, raw).map(ConfigValue::Boolean),
        ConfigType::Number => parse_int(key, raw).map(ConfigValue::Number),
        ConfigType::List => parse_list(key, raw, delimiter).map(ConfigValue::List),
    }
}
