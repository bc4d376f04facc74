//! Textual field declarations: `name=KEY:type[:default]`.
//!
//! Lets a shape be described on a command line. Defaults are parsed with the
//! same parsers used for env values, so `flag=FLAG:boolean:TRUE` works.

use crate::readers::parse_value;
use crate::schema::{ConfigShape, ConfigType, FieldDesc, UnknownConfigType};
use std::str::FromStr;

/// Why a declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// Not of the form `name=KEY:type[:default]`.
    #[error("field declaration '{0}' must look like name=KEY:type[:default]")]
    Malformed(String),
    /// Unknown type name.
    #[error(transparent)]
    UnknownType(#[from] UnknownConfigType),
    /// Default does not parse as the declared type.
    #[error("invalid default for field '{name}': {message}")]
    InvalidDefault {
        /// Field name.
        name: String,
        /// Parser message.
        message: String,
    },
}

/// A parsed field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Field name in the resulting record.
    pub name: String,
    /// Env key.
    pub key: String,
    /// Declared kind.
    pub kind: ConfigType,
    /// Raw default text, parsed on conversion.
    pub default: Option<String>,
}

impl FromStr for FieldDeclaration {
    type Err = DeclarationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || DeclarationError::Malformed(input.to_owned());

        let (name, rest) = input.split_once('=').ok_or_else(malformed)?;
        let mut parts = rest.splitn(3, ':');
        let key = parts.next().map(str::trim).unwrap_or_default();
        let kind = parts.next().ok_or_else(malformed)?;
        let default = parts.next().map(ToOwned::to_owned);

        // Shape errors win over an unknown type name.
        let name = name.trim();
        if name.is_empty() || key.is_empty() {
            return Err(malformed());
        }
        let kind = kind.parse::<ConfigType>()?;

        Ok(Self {
            name: name.to_owned(),
            key: key.to_owned(),
            kind,
            default,
        })
    }
}

impl FieldDeclaration {
    /// Build the descriptor, parsing the default with the field's parser.
    pub fn to_field_desc(&self, list_delimiter: &str) -> Result<FieldDesc, DeclarationError> {
        let desc = FieldDesc::new(&self.key, self.kind).with_delimiter(list_delimiter);
        let Some(raw) = self.default.as_deref() else {
            return Ok(desc);
        };

        let invalid = |message: String| DeclarationError::InvalidDefault {
            name: self.name.clone(),
            message,
        };
        let value = parse_value(self.kind, &self.key, raw, list_delimiter)
            .into_result()
            .map_err(invalid)?;
        desc.with_default_value(value)
            .map_err(|mismatch| invalid(mismatch.to_string()))
    }
}

/// Build a shape from declarations, in order.
pub fn shape_from_declarations<'a, I>(
    declarations: I,
    list_delimiter: &str,
) -> Result<ConfigShape, DeclarationError>
where
    I: IntoIterator<Item = &'a FieldDeclaration>,
{
    declarations
        .into_iter()
        .try_fold(ConfigShape::new(), |shape, declaration| {
            Ok(shape.field(&declaration.name, declaration.to_field_desc(list_delimiter)?))
        })
}
