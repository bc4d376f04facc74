//! Environment access and single-key readers.
//!
//! Reads go through [`EnvSource`] so tests and embedders can feed a fixed map
//! instead of the process environment. [`StdEnv`] is the process-backed
//! source used by [`crate::read_from_environment`].

use crate::readers::{ReadError, parse_boolean, parse_int, parse_list, parse_string};
use crate::schema::DEFAULT_LIST_DELIMITER;
use envsure_shared::{Either, Maybe};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

// =============================================================================
// SOURCES
// =============================================================================

/// A read-only view of environment variables.
pub trait EnvSource: Send + Sync {
    /// Raw value of `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Raw value of `key` as a [`Maybe`]. An empty value is still present.
    fn get_variable(&self, key: &str) -> Maybe<String> {
        Maybe::of(self.get(key))
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Empty environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Wrap an existing map.
    #[must_use]
    pub const fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    /// Build from key/value pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Unset `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<H: BuildHasher + Send + Sync> EnvSource for HashMap<String, String, H> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Look up `key` in the process environment.
pub fn get_variable(key: &str) -> Maybe<String> {
    StdEnv.get_variable(key)
}

// =============================================================================
// KEY READERS
// =============================================================================

fn read_with<S, T, P>(source: &S, key: &str, parse: P) -> Either<String, T>
where
    S: EnvSource + ?Sized,
    P: FnOnce(&str) -> Either<String, T>,
{
    source
        .get_variable(key)
        .to_either(ReadError::missing(key).to_string())
        .flat_map(|raw| parse(&raw))
}

/// Read `key` as a string.
pub fn get_string<S: EnvSource + ?Sized>(source: &S, key: &str) -> Either<String, String> {
    read_with(source, key, |raw| parse_string(key, raw))
}

/// Read `key` as an integer.
pub fn get_int<S: EnvSource + ?Sized>(source: &S, key: &str) -> Either<String, i64> {
    read_with(source, key, |raw| parse_int(key, raw))
}

/// Read `key` as a boolean.
pub fn get_boolean<S: EnvSource + ?Sized>(source: &S, key: &str) -> Either<String, bool> {
    read_with(source, key, |raw| parse_boolean(key, raw))
}

/// Read `key` as a list split on `delimiter` (`,` when `None`).
pub fn get_string_list<S: EnvSource + ?Sized>(
    source: &S,
    key: &str,
    delimiter: Option<&str>,
) -> Either<String, Vec<String>> {
    let delimiter = delimiter.unwrap_or(DEFAULT_LIST_DELIMITER);
    read_with(source, key, |raw| parse_list(key, raw, delimiter))
}

// =============================================================================
// TESTS
// =============================================================================
