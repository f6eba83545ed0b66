//! Normalization of typed documentation records into plain, ordered data.
//!
//! Every typed element of an OpenAPI document is reduced to a [`Node`], the
//! generic mapping / sequence / scalar tree that the serializers and the
//! documentation handlers work on. The rules applied to records are:
//!
//! * fields holding a null value are omitted;
//! * a field named `ref` is emitted as `$ref`;
//! * any other field name is converted from snake case to lower camel case,
//!   with trailing underscores removed (`in_` becomes `in`);
//! * keys of mappings are kept as they are;
//! * scalars are passed through a chain of [`ValueTypeHandler`]s, so enums,
//!   UUIDs, dates, times and byte strings get their textual wire form.
//!
//! # Examples
//!
//! ```
//! use openapidocs_core::normalize::{Normalizer, OpenApiElement, Raw};
//! use openapidocs_core::openapi_element;
//!
//! #[derive(Default)]
//! struct Pet {
//!     pet_name: Option<String>,
//!     ref_: Option<String>,
//! }
//!
//! openapi_element!(Pet { pet_name, ref_ => "ref" });
//!
//! let pet = Pet { pet_name: Some("Garfield".into()), ref_: None };
//! let node = Normalizer::default().normalize(&pet);
//! assert_eq!(node, serde_json::json!({"petName": "Garfield"}));
//! ```

// Internal imports (std, crate)
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

// External imports (alphabetized)
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde_json::{Map, Number};
use uuid::Uuid;

/// Generic document tree: mappings keep insertion order.
pub type Node = serde_json::Value;

/// Name of the environment variable that controls how date-times are written.
pub const DATETIME_FORMAT_ENV: &str = "OPENAPIDOCS_DATETIME_FORMAT";

/// A scalar value, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Number(&'a Number),
    Str(&'a str),
    /// Value of an enumeration member
    Enum(&'static str),
    Uuid(Uuid),
    Time(NaiveTime),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
    Bytes(&'a [u8]),
}

impl Scalar<'_> {
    /// Plain conversion used when no handler claims the value.
    fn to_node(&self) -> Node {
        match self {
            Scalar::Null => Node::Null,
            Scalar::Bool(value) => Node::Bool(*value),
            Scalar::Int(value) => Node::from(*value),
            Scalar::UInt(value) => Node::from(*value),
            Scalar::Float(value) => Number::from_f64(*value).map_or(Node::Null, Node::Number),
            Scalar::Number(value) => Node::Number((*value).clone()),
            Scalar::Str(value) => Node::String((*value).to_string()),
            other => CommonBuiltInTypesHandler
                .normalize(other)
                .unwrap_or(Node::Null),
        }
    }
}

/// Borrowed view of a value, telling the normalizer how to walk it.
pub enum Raw<'a> {
    Scalar(Scalar<'a>),
    /// An already generic value, copied as is
    Node(&'a Node),
    /// A documentation record, following the dict-building rule
    Record(&'a dyn OpenApiElement),
    /// A record with neutral keys: names are kept and nulls are not dropped
    Plain(&'a dyn PlainRecord),
    /// A value that produces its own wire form
    Custom(&'a dyn CustomSerializable),
    Seq(Vec<Raw<'a>>),
    Map(Vec<(Raw<'a>, Raw<'a>)>),
}

impl Raw<'_> {
    /// Short description of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Raw::Scalar(_) => "scalar",
            Raw::Node(_) => "generic value",
            Raw::Record(_) => "record",
            Raw::Plain(_) => "plain record",
            Raw::Custom(_) => "custom serializable",
            Raw::Seq(_) => "sequence",
            Raw::Map(_) => "mapping",
        }
    }
}

/// Types that can be normalized into a [`Node`].
pub trait Normalize {
    fn raw(&self) -> Raw<'_>;
}

/// A documentation record: its fields, in declaration order.
pub trait OpenApiElement {
    fn fields(&self) -> Vec<(&'static str, Raw<'_>)>;
}

/// A record that is not part of the documentation vocabulary.
pub trait PlainRecord {
    fn entries(&self) -> Vec<(&'static str, Raw<'_>)>;
}

/// A value that produces its own wire form instead of following the
/// dict-building rule.
pub trait CustomSerializable {
    fn to_wire_form(&self, normalizer: &Normalizer) -> Node;
}

/// One link of the scalar normalization chain.
pub trait ValueTypeHandler: Send + Sync {
    /// Returns the normalized value, or `None` when the handler does not
    /// apply to it.
    fn normalize(&self, value: &Scalar<'_>) -> Option<Node>;
}

/// Handles enums, UUIDs, times, dates, date-times and byte strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonBuiltInTypesHandler;

impl ValueTypeHandler for CommonBuiltInTypesHandler {
    fn normalize(&self, value: &Scalar<'_>) -> Option<Node> {
        let text = match value {
            Scalar::Enum(value) => (*value).to_string(),
            Scalar::Uuid(value) => value.to_string(),
            Scalar::Time(value) => value.format("%H:%M:%S").to_string(),
            Scalar::Date(value) => value.format("%Y-%m-%d").to_string(),
            Scalar::DateTime(value) => value.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
            Scalar::NaiveDateTime(value) => value.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Scalar::Bytes(value) => URL_SAFE.encode(value),
            _ => return None,
        };
        Some(Node::String(text))
    }
}

/// Writes date-times with a custom strftime-like format.
///
/// Without a format, the handler steps aside and the ISO-8601 form applies.
#[derive(Debug, Default, Clone)]
pub struct DateTimeFormatHandler {
    format: Option<String>,
}

impl DateTimeFormatHandler {
    pub fn new(format: Option<String>) -> Self {
        Self { format }
    }

    /// Reads the format from `OPENAPIDOCS_DATETIME_FORMAT`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(DATETIME_FORMAT_ENV)
                .ok()
                .filter(|value| !value.is_empty()),
        )
    }

    fn format_with<D: std::fmt::Display>(formatted: D) -> Option<Node> {
        let mut text = String::new();
        // an invalid format string surfaces as a fmt error
        write!(text, "{formatted}").ok()?;
        Some(Node::String(text))
    }
}

impl ValueTypeHandler for DateTimeFormatHandler {
    fn normalize(&self, value: &Scalar<'_>) -> Option<Node> {
        let format = self.format.as_deref()?;
        match value {
            Scalar::DateTime(value) => Self::format_with(value.format(format)),
            Scalar::NaiveDateTime(value) => Self::format_with(value.format(format)),
            _ => None,
        }
    }
}

/// Converts typed values into [`Node`]s.
pub struct Normalizer {
    handlers: Vec<Box<dyn ValueTypeHandler>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            handlers: vec![Box::new(CommonBuiltInTypesHandler)],
        }
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Normalizer {
    /// Registers a handler that is consulted before the ones already present.
    pub fn with_handler<H: ValueTypeHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.insert(0, Box::new(handler));
        self
    }

    /// Normalizer honouring `OPENAPIDOCS_DATETIME_FORMAT`.
    pub fn from_env() -> Self {
        Self::default().with_handler(DateTimeFormatHandler::from_env())
    }

    pub fn normalize<T: Normalize + ?Sized>(&self, value: &T) -> Node {
        self.normalize_raw(value.raw())
    }

    pub fn normalize_raw(&self, raw: Raw<'_>) -> Node {
        match raw {
            Raw::Scalar(value) => self.normalize_scalar(&value),
            Raw::Node(node) => node.clone(),
            Raw::Custom(value) => value.to_wire_form(self),
            Raw::Record(record) => self.dict_from_fields(record.fields()),
            Raw::Plain(record) => {
                let data = record
                    .entries()
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), self.normalize_raw(value)))
                    .collect::<Map<String, Node>>();
                Node::Object(data)
            }
            Raw::Seq(items) => Node::Array(
                items
                    .into_iter()
                    .map(|item| self.normalize_raw(item))
                    .collect(),
            ),
            Raw::Map(entries) => {
                let mut data = Map::new();
                for (key, value) in entries {
                    let key = key_text(self.normalize_raw(key));
                    data.insert(key, self.normalize_raw(value));
                }
                Node::Object(data)
            }
        }
    }

    /// Runs a scalar through the handler chain; the first handler that
    /// applies wins.
    pub fn normalize_scalar(&self, value: &Scalar<'_>) -> Node {
        self.handlers
            .iter()
            .find_map(|handler| handler.normalize(value))
            .unwrap_or_else(|| value.to_node())
    }

    /// Builds a mapping out of record fields: null values are skipped, `ref`
    /// becomes `$ref` and other names are camel-cased.
    pub fn dict_from_fields(&self, fields: Vec<(&str, Raw<'_>)>) -> Node {
        let mut data = Map::new();
        for (key, value) in fields {
            let value = self.normalize_raw(value);
            if value.is_null() {
                continue;
            }
            if key == "ref" {
                data.insert("$ref".to_string(), value);
                continue;
            }
            data.insert(normalize_key(key), value);
        }
        Node::Object(data)
    }
}

/// Converts a field name to its wire form.
///
/// Trailing underscores are removed, then the name is written in lower camel
/// case: `terms_of_service` becomes `termsOfService`, `in_` becomes `in`.
/// Enum keys and numeric keys never reach this function: they are keys of
/// mappings, which are written through their scalar form.
pub fn normalize_key(key: &str) -> String {
    key.trim_end_matches('_').to_lower_camel_case()
}

fn key_text(key: Node) -> String {
    match key {
        Node::String(text) => text,
        other => other.to_string(),
    }
}

/// Byte string, written as URL-safe base64 text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl Normalize for Binary {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Bytes(&self.0))
    }
}

impl Normalize for Node {
    fn raw(&self) -> Raw<'_> {
        Raw::Node(self)
    }
}

impl Normalize for Number {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Number(self))
    }
}

impl Normalize for str {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Str(self))
    }
}

impl Normalize for String {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Str(self))
    }
}

impl Normalize for bool {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Bool(*self))
    }
}

macro_rules! normalize_as {
    ($variant:ident($target:ty): $($ty:ty),*) => {
        $(
            impl Normalize for $ty {
                fn raw(&self) -> Raw<'_> {
                    Raw::Scalar(Scalar::$variant(*self as $target))
                }
            }
        )*
    };
}

normalize_as!(Int(i64): i8, i16, i32, i64, isize);
normalize_as!(UInt(u64): u8, u16, u32, u64, usize);
normalize_as!(Float(f64): f32, f64);

impl Normalize for Uuid {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Uuid(*self))
    }
}

impl Normalize for NaiveDate {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Date(*self))
    }
}

impl Normalize for NaiveTime {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::Time(*self))
    }
}

impl Normalize for NaiveDateTime {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::NaiveDateTime(*self))
    }
}

impl<Tz: TimeZone> Normalize for DateTime<Tz> {
    fn raw(&self) -> Raw<'_> {
        Raw::Scalar(Scalar::DateTime(self.fixed_offset()))
    }
}

impl<T: Normalize + ?Sized> Normalize for &T {
    fn raw(&self) -> Raw<'_> {
        (**self).raw()
    }
}

impl<T: Normalize + ?Sized> Normalize for Box<T> {
    fn raw(&self) -> Raw<'_> {
        (**self).raw()
    }
}

impl<T: Normalize> Normalize for Option<T> {
    fn raw(&self) -> Raw<'_> {
        match self {
            Some(value) => value.raw(),
            None => Raw::Scalar(Scalar::Null),
        }
    }
}

impl<T: Normalize> Normalize for [T] {
    fn raw(&self) -> Raw<'_> {
        Raw::Seq(self.iter().map(Normalize::raw).collect())
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn raw(&self) -> Raw<'_> {
        self.as_slice().raw()
    }
}

impl<K: Normalize, V: Normalize> Normalize for IndexMap<K, V> {
    fn raw(&self) -> Raw<'_> {
        Raw::Map(self.iter().map(|(k, v)| (k.raw(), v.raw())).collect())
    }
}

impl<K: Normalize, V: Normalize> Normalize for BTreeMap<K, V> {
    fn raw(&self) -> Raw<'_> {
        Raw::Map(self.iter().map(|(k, v)| (k.raw(), v.raw())).collect())
    }
}

impl<K: Normalize, V: Normalize, S> Normalize for HashMap<K, V, S> {
    fn raw(&self) -> Raw<'_> {
        Raw::Map(self.iter().map(|(k, v)| (k.raw(), v.raw())).collect())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}

/// Implements [`OpenApiElement`] for a record, listing its fields in
/// declaration order. A field can be given an explicit source name, for
/// fields whose name is a Rust keyword.
#[macro_export]
macro_rules! openapi_element {
    ($ty:ident { $($field:ident $(=> $name:literal)?),* $(,)? }) => {
        impl $crate::normalize::OpenApiElement for $ty {
            fn fields(&self) -> Vec<(&'static str, $crate::normalize::Raw<'_>)> {
                vec![
                    $((
                        $crate::field_name!($field $(, $name)?),
                        $crate::normalize::Normalize::raw(&self.$field),
                    )),*
                ]
            }
        }

        impl $crate::normalize::Normalize for $ty {
            fn raw(&self) -> $crate::normalize::Raw<'_> {
                $crate::normalize::Raw::Record(self)
            }
        }
    };
}

/// Implements [`PlainRecord`] for a struct whose field names are kept as is.
#[macro_export]
macro_rules! plain_record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::normalize::PlainRecord for $ty {
            fn entries(&self) -> Vec<(&'static str, $crate::normalize::Raw<'_>)> {
                vec![$((stringify!($field), $crate::normalize::Normalize::raw(&self.$field))),*]
            }
        }

        impl $crate::normalize::Normalize for $ty {
            fn raw(&self) -> $crate::normalize::Raw<'_> {
                $crate::normalize::Raw::Plain(self)
            }
        }
    };
}

/// Declares an enumeration whose members are written as fixed strings.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),*
        }

        impl $name {
            /// Wire value of the member
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),*
                }
            }

            /// All members, in declaration order
            pub fn all() -> &'static [Self] {
                &[$(Self::$variant),*]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)*
                    _ => Err(format!("Unknown {} value: {}", stringify!($name), s)),
                }
            }
        }

        impl $crate::normalize::Normalize for $name {
            fn raw(&self) -> $crate::normalize::Raw<'_> {
                $crate::normalize::Raw::Scalar($crate::normalize::Scalar::Enum(self.as_str()))
            }
        }
    };
}
