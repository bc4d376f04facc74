//! Config shape types: field descriptors, parsed values and records.
//!
//! A [`ConfigShape`] is an ordered map from field names to [`FieldDesc`]s.
//! Descriptors are usually built through the typed [`Field`] builders so the
//! default and override of a field are checked against its kind at compile
//! time, then erased into [`FieldDesc`] for the reader.

use envsure_shared::{REDACTED, is_secret_key};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

/// Delimiter used by list fields unless one is configured.
pub const DEFAULT_LIST_DELIMITER: &str = ",";

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Kind tag attached to every field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    /// Raw string, passed through unchanged.
    String,
    /// `true` / `false`.
    Boolean,
    /// Signed 64-bit integer.
    Number,
    /// Delimited list of strings.
    List,
}

impl ConfigType {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::String, Self::Boolean, Self::Number, Self::List];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Unknown config type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown config type '{0}' (expected string, boolean, number, or list)")]
pub struct UnknownConfigType(pub String);

impl FromStr for ConfigType {
    type Err = UnknownConfigType;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let name = input.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownConfigType(name.to_owned()))
    }
}

// =============================================================================
// VALUES
// =============================================================================

/// A parsed config value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Number(i64),
    /// String value.
    Text(String),
    /// List of strings.
    List(Vec<String>),
}

impl ConfigValue {
    /// The kind this value satisfies.
    #[must_use]
    pub const fn kind(&self) -> ConfigType {
        match self {
            Self::Boolean(_) => ConfigType::Boolean,
            Self::Number(_) => ConfigType::Number,
            Self::Text(_) => ConfigType::String,
            Self::List(_) => ConfigType::List,
        }
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

// =============================================================================
// TYPED FIELDS
// =============================================================================

/// Compile-time marker tying a field to its Rust value type.
pub trait ConfigKind {
    /// Runtime tag for the kind.
    const TYPE: ConfigType;
    /// Value produced for fields of this kind.
    type Value: Into<ConfigValue> + Send + 'static;
}

/// Marker for string fields.
#[derive(Debug, Clone, Copy)]
pub struct Text;
/// Marker for boolean fields.
#[derive(Debug, Clone, Copy)]
pub struct Flag;
/// Marker for integer fields.
#[derive(Debug, Clone, Copy)]
pub struct Integer;
/// Marker for list fields.
#[derive(Debug, Clone, Copy)]
pub struct StringList;

impl ConfigKind for Text {
    const TYPE: ConfigType = ConfigType::String;
    type Value = String;
}

impl ConfigKind for Flag {
    const TYPE: ConfigType = ConfigType::Boolean;
    type Value = bool;
}

impl ConfigKind for Integer {
    const TYPE: ConfigType = ConfigType::Number;
    type Value = i64;
}

impl ConfigKind for StringList {
    const TYPE: ConfigType = ConfigType::List;
    type Value = Vec<String>;
}

/// Input handed to an override hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRequest {
    /// Env key of the field.
    pub key: String,
    /// Raw env value, when the variable is set.
    pub raw: Option<String>,
}

/// Type-erased async override hook.
///
/// `Ok` replaces whatever the environment produced. `Err` carries a message
/// and leaves the field to its env value or default.
pub type OverrideHook =
    Arc<dyn Fn(OverrideRequest) -> BoxFuture<'static, Result<ConfigValue, String>> + Send + Sync>;

/// Typed field builder.
pub struct Field<K: ConfigKind> {
    key: String,
    default: Option<K::Value>,
    override_hook: Option<OverrideHook>,
    delimiter: String,
    kind: PhantomData<fn() -> K>,
}

impl Field<Text> {
    /// String field read from `key`.
    pub fn string(key: impl Into<String>) -> Self {
        Self::with_key(key)
    }
}

impl Field<Flag> {
    /// Boolean field read from `key`.
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::with_key(key)
    }
}

impl Field<Integer> {
    /// Integer field read from `key`.
    pub fn number(key: impl Into<String>) -> Self {
        Self::with_key(key)
    }
}

impl Field<StringList> {
    /// List field read from `key`, split on `,`.
    pub fn list(key: impl Into<String>) -> Self {
        Self::with_key(key)
    }

    /// Split on `delimiter` instead of `,`.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

impl<K: ConfigKind> Field<K> {
    fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: None,
            override_hook: None,
            delimiter: DEFAULT_LIST_DELIMITER.to_owned(),
            kind: PhantomData,
        }
    }

    /// Value used when the variable is missing or fails to parse.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<K::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach an async override consulted on every read.
    #[must_use]
    pub fn with_override<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(OverrideRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<K::Value, String>> + Send + 'static,
    {
        let erased: OverrideHook = Arc::new(move |request: OverrideRequest| {
            let pending = hook(request);
            async move { pending.await.map(Into::<ConfigValue>::into) }.boxed()
        });
        self.override_hook = Some(erased);
        self
    }
}

impl<K: ConfigKind> fmt::Debug for Field<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Field")
            .field("key", &self.key)
            .field("kind", &K::TYPE)
            .field("delimiter", &self.delimiter)
            .field("has_default", &self.default.is_some())
            .field("has_override", &self.override_hook.is_some())
            .finish()
    }
}

// =============================================================================
// FIELD DESCRIPTORS
// =============================================================================

/// Default whose kind does not match the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("default for {key} must be a {expected}, got a {found}")]
pub struct KindMismatch {
    /// Env key of the field.
    pub key: String,
    /// Kind declared on the field.
    pub expected: ConfigType,
    /// Kind of the offered default.
    pub found: ConfigType,
}

/// Type-erased field descriptor consumed by the reader.
#[derive(Clone)]
pub struct FieldDesc {
    key: String,
    kind: ConfigType,
    default: Option<ConfigValue>,
    override_hook: Option<OverrideHook>,
    delimiter: String,
}

impl FieldDesc {
    /// Descriptor without default or override.
    pub fn new(key: impl Into<String>, kind: ConfigType) -> Self {
        Self {
            key: key.into(),
            kind,
            default: None,
            override_hook: None,
            delimiter: DEFAULT_LIST_DELIMITER.to_owned(),
        }
    }

    /// Attach a default, rejecting values of the wrong kind.
    pub fn with_default_value(mut self, value: ConfigValue) -> Result<Self, KindMismatch> {
        if value.kind() != self.kind {
            return Err(KindMismatch {
                key: self.key,
                expected: self.kind,
                found: value.kind(),
            });
        }
        self.default = Some(value);
        Ok(self)
    }

    /// Set the list delimiter. Ignored for non-list kinds.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Env key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Declared kind.
    pub const fn kind(&self) -> ConfigType {
        self.kind
    }

    /// Default value, if any.
    pub const fn default_value(&self) -> Option<&ConfigValue> {
        self.default.as_ref()
    }

    /// Override hook, if any.
    pub const fn override_hook(&self) -> Option<&OverrideHook> {
        self.override_hook.as_ref()
    }

    /// List delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Whether values read through this field should stay out of output.
    pub fn is_secret(&self) -> bool {
        is_secret_key(&self.key)
    }
}

impl fmt::Debug for FieldDesc {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FieldDesc")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("has_default", &self.default.is_some())
            .field("has_override", &self.override_hook.is_some())
            .field("delimiter", &self.delimiter)
            .finish()
    }
}

impl<K: ConfigKind> From<Field<K>> for FieldDesc {
    fn from(field: Field<K>) -> Self {
        Self {
            key: field.key,
            kind: K::TYPE,
            default: field.default.map(Into::into),
            override_hook: field.override_hook,
            delimiter: field.delimiter,
        }
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// Ordered set of named field descriptors.
#[derive(Debug, Clone, Default)]
pub struct ConfigShape {
    fields: Vec<(String, FieldDesc)>,
}

impl ConfigShape {
    /// Empty shape.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: impl Into<FieldDesc>) -> Self {
        self.insert(name, field);
        self
    }

    /// Add a field. Redeclaring a name replaces it in place.
    pub fn insert(&mut self, name: impl Into<String>, field: impl Into<FieldDesc>) {
        let name = name.into();
        let field = field.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((name, field)),
        }
    }

    /// Descriptor for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldDesc> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, field)| field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDesc)> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field))
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A fully validated config: field name to parsed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRecord(BTreeMap<String, ConfigValue>);

impl ConfigRecord {
    /// Value of `name`.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.0.get(name)
    }

    /// String value of `name`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            ConfigValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Boolean value of `name`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name)? {
            ConfigValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value of `name`.
    pub fn get_number(&self, name: &str) -> Option<i64> {
        match self.0.get(name)? {
            ConfigValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// List value of `name`.
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name)? {
            ConfigValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Unwrap into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, ConfigValue> {
        self.0
    }

    /// Deserialize into a caller-defined struct keyed by field name.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::to_value(self.0).and_then(serde_json::from_value)
    }

    /// Copy with secret fields replaced by the redaction marker.
    ///
    /// A field is secret when its name or its env key in `shape` looks like
    /// a credential.
    #[must_use]
    pub fn redacted(&self, shape: &ConfigShape) -> Self {
        self.0
            .iter()
            .map(|(name, value)| {
                let secret = is_secret_key(name)
                    || shape.get(name).is_some_and(FieldDesc::is_secret);
                let value = if secret {
                    ConfigValue::Text(REDACTED.to_owned())
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect()
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigRecord {
    fn from(values: BTreeMap<String, ConfigValue>) -> Self {
        Self(values)
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigRecord {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_type_round_trips_through_names() -> Result<(), Box<dyn Error>> {
        for kind in ConfigType::ALL {
            assert_eq!(kind.as_str().parse::<ConfigType>()?, kind);
        }
        assert_eq!(" Boolean ".parse::<ConfigType>()?, ConfigType::Boolean);
        assert_eq!(
            "float".parse::<ConfigType>(),
            Err(UnknownConfigType("float".to_owned()))
        );
        Ok(())
    }

    #[test]
    fn config_values_serialize_untagged() -> Result<(), Box<dyn Error>> {
        let values = vec![
            ConfigValue::from("db"),
            ConfigValue::from(true),
            ConfigValue::from(42_i64),
            ConfigValue::from(vec!["s3".to_owned()]),
        ];
        let json = serde_json::to_string(&values)?;
        assert_eq!(json, r#"["db",true,42,["s3"]]"#);

        let decoded: Vec<ConfigValue> = serde_json::from_str(&json)?;
        assert_eq!(decoded, values);
        Ok(())
    }

    #[test]
    fn typed_fields_erase_with_kind_and_default() {
        let desc = FieldDesc::from(Field::boolean("DATABASE_AUTO_COMMIT").with_default(false));
        assert_eq!(desc.key(), "DATABASE_AUTO_COMMIT");
        assert_eq!(desc.kind(), ConfigType::Boolean);
        assert_eq!(desc.default_value(), Some(&ConfigValue::Boolean(false)));
        assert!(desc.override_hook().is_none());

        let list = FieldDesc::from(Field::list("AWS_ENABLED_SERVICES").with_delimiter(";"));
        assert_eq!(list.kind(), ConfigType::List);
        assert_eq!(list.delimiter(), ";");
        assert_eq!(FieldDesc::from(Field::number("PORT")).delimiter(), ",");
    }

    #[test]
    fn field_debug_shows_delimiter_and_hides_values() {
        let printed = format!("{:?}", Field::list("HOSTS").with_delimiter(";"));
        assert!(printed.contains(r#"delimiter: ";""#), "{printed}");
        assert!(printed.contains("kind: List"), "{printed}");

        let secret = format!("{:?}", Field::string("DB_PASSWORD").with_default("hunter2"));
        assert!(secret.contains("has_default: true"), "{secret}");
        assert!(!secret.contains("hunter2"), "{secret}");
    }

    #[test]
    fn default_value_must_match_kind() {
        let error = FieldDesc::new("PORT", ConfigType::Number)
            .with_default_value(ConfigValue::from("eighty"))
            .err();
        assert_eq!(
            error,
            Some(KindMismatch {
                key: "PORT".to_owned(),
                expected: ConfigType::Number,
                found: ConfigType::String,
            })
        );
    }

    #[test]
    fn redeclared_fields_replace_in_place() {
        let shape = ConfigShape::new()
            .field("foo", Field::string("FOO"))
            .field("bar", Field::string("BAR"))
            .field("foo", Field::number("FOO_COUNT"));

        let names: Vec<&str> = shape.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["foo", "bar"]);
        assert_eq!(shape.len(), 2);
        assert_eq!(
            shape.get("foo").map(FieldDesc::kind),
            Some(ConfigType::Number)
        );
    }

    #[test]
    fn record_getters_check_the_variant() {
        let record: ConfigRecord = [
            ("name".to_owned(), ConfigValue::from("db")),
            ("port".to_owned(), ConfigValue::from(5432_i64)),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.get_str("name"), Some("db"));
        assert_eq!(record.get_number("port"), Some(5432));
        assert_eq!(record.get_bool("port"), None);
        assert_eq!(record.get_list("missing"), None);
    }

    #[test]
    fn records_deserialize_into_typed_structs() -> Result<(), Box<dyn Error>> {
        #[derive(Debug, PartialEq, Eq, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Database {
            db_name: String,
            auto_commit: bool,
        }

        let record: ConfigRecord = [
            ("dbName".to_owned(), ConfigValue::from("orders")),
            ("autoCommit".to_owned(), ConfigValue::from(false)),
        ]
        .into_iter()
        .collect();

        let typed: Database = record.into_typed()?;
        assert_eq!(
            typed,
            Database {
                db_name: "orders".to_owned(),
                auto_commit: false,
            }
        );
        Ok(())
    }

    #[test]
    fn redaction_covers_field_names_and_env_keys() {
        let shape = ConfigShape::new()
            .field("secret", Field::string("AWS_SECRET"))
            .field("region", Field::string("AWS_REGION"))
            .field("apiToken", Field::string("UPSTREAM"));
        let record: ConfigRecord = [
            ("secret".to_owned(), ConfigValue::from("hunter2")),
            ("region".to_owned(), ConfigValue::from("eu-west-1")),
            ("apiToken".to_owned(), ConfigValue::from("abc")),
        ]
        .into_iter()
        .collect();

        let redacted = record.redacted(&shape);
        assert_eq!(redacted.get_str("secret"), Some(REDACTED));
        assert_eq!(redacted.get_str("apiToken"), Some(REDACTED));
        assert_eq!(redacted.get_str("region"), Some("eu-west-1"));
    }
}
