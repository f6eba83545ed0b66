//! Serialization of documentation records to JSON and YAML text.
//!
//! # Examples
//!
//! ```
//! use openapidocs_core::serializer::{Format, Serializer};
//! use openapidocs_core::v3::{Parameter, ParameterLocation};
//!
//! let serializer = Serializer::default();
//! let parameter = Parameter::new("search", ParameterLocation::Query);
//! let yaml = serializer.serialize(&parameter, Format::Yaml).unwrap();
//! assert_eq!(yaml, "name: search\nin: query\n");
//! ```

// Internal imports (std, crate)
use crate::error::{Error, Result};
use crate::normalize::{Node, Normalize, Normalizer, Raw};
use crate::yaml;

// External imports (alphabetized)
use serde::Serialize as _;
use serde_json::ser::PrettyFormatter;

crate::wire_enum! {
    /// Output text format
    pub enum Format {
        Yaml => "YAML",
        Json => "JSON",
    }
}

/// Writes JSON with four spaces of indentation, keeping non-ASCII text as is.
pub fn to_json_string(node: &Node) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut writer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    node.serialize(&mut writer)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Turns documentation records into JSON or YAML text.
#[derive(Debug, Default)]
pub struct Serializer {
    normalizer: Normalizer,
}

impl Serializer {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalizes a record, a plain record or a custom serializable value.
    ///
    /// Scalars and bare collections are rejected with
    /// [`Error::UnsupportedValue`].
    pub fn to_obj<T: Normalize + ?Sized>(&self, item: &T) -> Result<Node> {
        match item.raw() {
            raw @ (Raw::Record(_) | Raw::Plain(_) | Raw::Custom(_)) => {
                Ok(self.normalizer.normalize_raw(raw))
            }
            other => Err(Error::UnsupportedValue(format!(
                "cannot serialize a {}: expected a documentation element",
                other.kind()
            ))),
        }
    }

    pub fn to_json<T: Normalize + ?Sized>(&self, item: &T) -> Result<String> {
        to_json_string(&self.to_obj(item)?)
    }

    pub fn to_yaml<T: Normalize + ?Sized>(&self, item: &T) -> Result<String> {
        yaml::to_string(&self.to_obj(item)?)
    }

    pub fn serialize<T: Normalize + ?Sized>(&self, item: &T, format: Format) -> Result<String> {
        log::debug!("Serializing element to {}", format);
        match format {
            Format::Yaml => self.to_yaml(item),
            Format::Json => self.to_json(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Scalar;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_json_string_uses_four_spaces() {
        let node = json!({"a": [1, {"b": "café"}], "c": {}});
        let expected = "{\n    \"a\": [\n        1,\n        {\n            \"b\": \"café\"\n        }\n    ],\n    \"c\": {}\n}";
        assert_eq!(to_json_string(&node).unwrap(), expected);
    }

    #[test]
    fn test_rejects_scalars_and_collections() {
        struct Value;

        impl Normalize for Value {
            fn raw(&self) -> Raw<'_> {
                Raw::Scalar(Scalar::Int(1))
            }
        }

        let serializer = Serializer::default();
        assert!(matches!(
            serializer.to_obj(&Value),
            Err(Error::UnsupportedValue(_))
        ));
        assert!(matches!(
            serializer.to_json(&vec!["a".to_string()]),
            Err(Error::UnsupportedValue(_))
        ));
    }

    #[test]
    fn test_format_names() {
        assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!(Format::Json.to_string(), "JSON");
    }
}
