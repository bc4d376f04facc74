//! # envsure-config
//!
//! Typed configuration read from environment variables.
//!
//! Declare a [`ConfigShape`] of named fields, read it with
//! [`read_from_environment`], and either handle the accumulated errors or
//! combine several shapes at startup with [`try_get_config`] /
//! [`get_config_unsafe`]. This crate depends on `shared` only.
//!
//! ```
//! use envsure_config::{ConfigShape, Field, MapEnv, read_from_source, try_get_config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
//! let env = MapEnv::from_pairs([("DATABASE_NAME", "orders")]);
//! let shape = ConfigShape::new()
//!     .field("dbName", Field::string("DATABASE_NAME"))
//!     .field("autoCommit", Field::boolean("DATABASE_AUTO_COMMIT").with_default(false));
//!
//! let database = runtime.block_on(read_from_source(&shape, &env));
//! let config = try_get_config([("database", database)])?;
//! let database = config.get("database");
//! assert_eq!(database.and_then(|db| db.get_str("dbName")), Some("orders"));
//! assert_eq!(database.and_then(|db| db.get_bool("autoCommit")), Some(false));
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Textual field declarations for command lines.
pub mod declaration;
/// Environment sources and single-key readers.
pub mod env;
/// Shape reading pipeline.
pub mod load;
/// Primitive value parsers.
pub mod readers;
/// Field, shape and record types.
pub mod schema;
/// Combining configs at startup.
pub mod startup;

pub use declaration::{DeclarationError, FieldDeclaration, shape_from_declarations};
pub use env::{
    EnvSource, MapEnv, StdEnv, get_boolean, get_int, get_string, get_string_list, get_variable,
};
pub use load::{ValidatedConfig, read_from_environment, read_from_source};
pub use readers::{ReadError, parse_boolean, parse_int, parse_list, parse_string, parse_value};
pub use schema::{
    ConfigKind, ConfigRecord, ConfigShape, ConfigType, ConfigValue, DEFAULT_LIST_DELIMITER, Field,
    FieldDesc, Flag, Integer, KindMismatch, OverrideHook, OverrideRequest, StringList, Text,
    UnknownConfigType,
};
pub use startup::{StartupConfigError, combine_configs, get_config_unsafe, try_get_config};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
