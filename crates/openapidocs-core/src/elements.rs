//! Building blocks shared by the OpenAPI 2, 3 and 3.1 vocabularies.

// Internal imports (std, crate)
use crate::normalize::{CustomSerializable, Node, Normalize, Normalizer, Raw};

// External imports (alphabetized)
use serde_json::Map;

/// A `$ref` pointer.
///
/// `summary` and `description` are only written when set; they are part of
/// the OpenAPI 3.1 reference object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reference {
    pub ref_: String,
    pub summary: Option<String>,
    pub description: Option<String>,
}

impl Reference {
    pub fn new<S: Into<String>>(ref_: S) -> Self {
        Self {
            ref_: ref_.into(),
            ..Default::default()
        }
    }

    pub fn with_summary<S: Into<String>>(mut self, summary: S) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl CustomSerializable for Reference {
    fn to_wire_form(&self, _normalizer: &Normalizer) -> Node {
        let mut data = Map::new();
        data.insert("$ref".to_string(), Node::String(self.ref_.clone()));
        for (key, value) in [("summary", &self.summary), ("description", &self.description)] {
            if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                data.insert(key.to_string(), Node::String(value.to_string()));
            }
        }
        Node::Object(data)
    }
}

impl Normalize for Reference {
    fn raw(&self) -> Raw<'_> {
        Raw::Custom(self)
    }
}

/// Either an inline element or a reference to one.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOr<T> {
    Ref(Reference),
    Item(T),
}

impl<T> RefOr<T> {
    pub fn item(value: T) -> Self {
        Self::Item(value)
    }

    pub fn reference<S: Into<String>>(ref_: S) -> Self {
        Self::Ref(Reference::new(ref_))
    }

    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(value) => Some(value),
            Self::Ref(_) => None,
        }
    }
}

impl<T: Normalize> Normalize for RefOr<T> {
    fn raw(&self) -> Raw<'_> {
        match self {
            Self::Ref(reference) => reference.raw(),
            Self::Item(value) => value.raw(),
        }
    }
}

/// A value that is either a known enumeration member or free text.
///
/// Used for schema types and formats, where documents often carry values
/// outside the enumerated ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Named<E> {
    Known(E),
    Other(String),
}

impl<E> Named<E> {
    pub fn other<S: Into<String>>(value: S) -> Self {
        Self::Other(value.into())
    }
}

impl<E> From<E> for Named<E> {
    fn from(value: E) -> Self {
        Self::Known(value)
    }
}

impl<E: Normalize> Normalize for Named<E> {
    fn raw(&self) -> Raw<'_> {
        match self {
            Self::Known(value) => value.raw(),
            Self::Other(value) => value.raw(),
        }
    }
}
