//! Startup helpers combining several validated configs.

use crate::load::ValidatedConfig;
use crate::schema::ConfigRecord;
use envsure_shared::{ErrorCode, ErrorEnvelope, NonEmptyVec, Validation, sequence_r};
use std::collections::BTreeMap;
use tracing::error;

/// Every error collected across the combined configs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing config keys at startup: {}", .errors.join(", "))]
pub struct StartupConfigError {
    errors: NonEmptyVec<String>,
}

impl StartupConfigError {
    /// Wrap accumulated errors.
    pub const fn new(errors: NonEmptyVec<String>) -> Self {
        Self { errors }
    }

    /// Accumulated errors in encounter order.
    pub const fn errors(&self) -> &NonEmptyVec<String> {
        &self.errors
    }

    /// Unwrap into the accumulated errors.
    pub fn into_errors(self) -> NonEmptyVec<String> {
        self.errors
    }
}

impl From<StartupConfigError> for ErrorEnvelope {
    fn from(error: StartupConfigError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("config", "missing_keys"), message)
            .with_details(error.into_errors())
    }
}

/// Combine named validated configs, accumulating every error.
pub fn combine_configs<K, I>(configs: I) -> Validation<String, BTreeMap<K, ConfigRecord>>
where
    K: Ord,
    I: IntoIterator<Item = (K, ValidatedConfig)>,
{
    sequence_r(configs)
}

/// Combine named validated configs, or report every error at once.
pub fn try_get_config<K, I>(configs: I) -> Result<BTreeMap<K, ConfigRecord>, StartupConfigError>
where
    K: Ord,
    I: IntoIterator<Item = (K, ValidatedConfig)>,
{
    combine_configs(configs)
        .map_left(StartupConfigError::new)
        .into_result()
}

/// Combine named validated configs, aborting the process on any error.
///
/// Meant for program entry points where running without config is
/// pointless. Use [`try_get_config`] everywhere else.
///
/// # Panics
///
/// Panics with `Missing config keys at startup: ...` listing every error.
#[expect(
    clippy::panic,
    reason = "fail-fast startup entry point; try_get_config is the fallible form"
)]
pub fn get_config_unsafe<K, I>(configs: I) -> BTreeMap<K, ConfigRecord>
where
    K: Ord,
    I: IntoIterator<Item = (K, ValidatedConfig)>,
{
    match try_get_config(configs) {
        Ok(config) => config,
        Err(startup_error) => {
            error!(
                errors = startup_error.errors().len(),
                "config validation failed at startup"
            );
            panic!("{startup_error}");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConfigValue;
    use envsure_shared::Either;
    use std::error::Error;

    fn valid(name: &str, value: &str) -> ValidatedConfig {
        Either::Right(
            [(name.to_owned(), ConfigValue::from(value))]
                .into_iter()
                .collect(),
        )
    }

    fn invalid(first: &str, rest: &[&str]) -> ValidatedConfig {
        let rest = rest.iter().map(|error| (*error).to_owned()).collect();
        Either::Left(NonEmptyVec::new(first.to_owned(), rest))
    }

    #[test]
    fn combines_valid_configs_by_name() -> Result<(), Box<dyn Error>> {
        let config = try_get_config([
            ("database", valid("dbName", "orders")),
            ("aws", valid("region", "eu-west-1")),
        ])?;

        assert_eq!(
            config.get("database").and_then(|db| db.get_str("dbName")),
            Some("orders")
        );
        assert_eq!(
            config.get("aws").and_then(|aws| aws.get_str("region")),
            Some("eu-west-1")
        );
        Ok(())
    }

    #[test]
    fn accumulates_errors_across_configs() {
        let result = try_get_config([
            (
                "database",
                invalid("Couldn't read DATABASE_NAME from environment", &[]),
            ),
            ("cache", valid("host", "localhost")),
            (
                "aws",
                invalid(
                    "Couldn't read AWS_REGION from environment",
                    &["Couldn't read AWS_SECRET from environment"],
                ),
            ),
        ]);

        let error = result.err();
        let expected = [
            "Missing config keys at startup: Couldn't read DATABASE_NAME from environment",
            "Couldn't read AWS_REGION from environment",
            "Couldn't read AWS_SECRET from environment",
        ]
        .join(", ");
        assert_eq!(error.as_ref().map(ToString::to_string), Some(expected));
        assert_eq!(error.map(|error| error.errors().len()), Some(3));
    }

    #[test]
    fn startup_errors_convert_to_envelopes() {
        let error = StartupConfigError::new(NonEmptyVec::new(
            "Couldn't read FOO from environment".to_owned(),
            vec!["Couldn't read BAR from environment".to_owned()],
        ));

        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::new("config", "missing_keys"));
        assert_eq!(
            envelope.to_string(),
            "config:missing_keys: Missing config keys at startup: \
             Couldn't read FOO from environment, Couldn't read BAR from environment"
        );
        assert_eq!(envelope.details.len(), 2);
        assert_eq!(
            envelope.metadata.get("error_count").map(String::as_str),
            Some("2")
        );
    }

    #[test]
    fn get_config_unsafe_returns_valid_configs() {
        let config = get_config_unsafe([("app", valid("name", "envsure"))]);
        assert_eq!(
            config.get("app").and_then(|app| app.get_str("name")),
            Some("envsure")
        );
    }

    #[test]
    #[should_panic(
        expected = "Missing config keys at startup: Couldn't read FOO from environment"
    )]
    fn get_config_unsafe_panics_with_every_error() {
        let _config =
            get_config_unsafe([("app", invalid("Couldn't read FOO from environment", &[]))]);
    }
}
