//! Reading whole config shapes from the environment.
//!
//! Each field resolves independently:
//!
//! 1. The env value is read and parsed by the field's kind.
//! 2. An override hook, when present, is awaited. `Ok` wins outright.
//! 3. If nothing produced a value, the default is used.
//! 4. Otherwise the field contributes every collected error.
//!
//! Override hooks for all fields run concurrently; results are folded back in
//! declaration order so the error list is deterministic.

use crate::env::{EnvSource, StdEnv};
use crate::readers::{ReadError, parse_value};
use crate::schema::{ConfigRecord, ConfigShape, ConfigValue, FieldDesc, OverrideRequest};
use envsure_shared::{Either, NonEmptyVec, Validation, sequence_r};
use futures_util::future::join_all;
use tracing::{debug, warn};

/// Outcome of reading one shape.
pub type ValidatedConfig = Either<NonEmptyVec<String>, ConfigRecord>;

/// Read `shape` from the process environment.
pub async fn read_from_environment(shape: &ConfigShape) -> ValidatedConfig {
    read_from_source(shape, &StdEnv).await
}

/// Read `shape` from `source`.
///
/// Every field is resolved even after a failure, so the `Left` lists all
/// problems at once.
pub async fn read_from_source<S>(shape: &ConfigShape, source: &S) -> ValidatedConfig
where
    S: EnvSource + ?Sized,
{
    let pending = shape.iter().map(|(name, field)| async move {
        (name.to_owned(), resolve_field(name, field, source).await)
    });
    let resolved = join_all(pending).await;

    let validated = sequence_r(resolved).map(ConfigRecord::from);
    match &validated {
        Either::Left(errors) => debug!(
            fields = shape.len(),
            errors = errors.len(),
            "config shape failed validation"
        ),
        Either::Right(_) => debug!(fields = shape.len(), "config shape validated"),
    }
    validated
}

async fn resolve_field<S>(
    name: &str,
    field: &FieldDesc,
    source: &S,
) -> Validation<String, ConfigValue>
where
    S: EnvSource + ?Sized,
{
    let key = field.key();
    let raw = source.get_variable(key).into_option();

    let from_env = raw
        .as_deref()
        .map_or_else(
            || Either::Left(ReadError::missing(key).to_string()),
            |raw| parse_value(field.kind(), key, raw, field.delimiter()),
        )
        .map_left(NonEmptyVec::singleton);

    let resolved = match field.override_hook() {
        Some(hook) => {
            let request = OverrideRequest {
                key: key.to_owned(),
                raw: raw.clone(),
            };
            match hook(request).await {
                Ok(value) => {
                    debug!(
                        field = name,
                        key,
                        kind = %field.kind(),
                        source = "override",
                        "resolved config field"
                    );
                    return Either::Right(value);
                },
                Err(message) => {
                    warn!(field = name, key, error = %message, "config override failed");
                    from_env.map_left(|errors| {
                        errors.concat([ReadError::override_failed(key, message).to_string()])
                    })
                },
            }
        },
        None => from_env,
    };

    match resolved {
        Either::Right(value) => {
            debug!(
                field = name,
                key,
                kind = %field.kind(),
                source = "env",
                "resolved config field"
            );
            Either::Right(value)
        },
        Either::Left(errors) => match field.default_value() {
            Some(default) => {
                if raw.is_some() {
                    warn!(
                        field = name,
                        key,
                        errors = errors.len(),
                        "invalid env value replaced by default"
                    );
                } else {
                    debug!(
                        field = name,
                        key,
                        kind = %field.kind(),
                        source = "default",
                        "resolved config field"
                    );
                }
                Either::Right(default.clone())
            },
            None => Either::Left(errors),
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================
