//! Synthesis of example values from schemas.
//!
//! [`ExampleGenerator`] dispatches on the schema `type` to a registry of
//! [`SchemaExampleHandler`]s. Registering a handler for an existing type
//! replaces it, which is how tests obtain deterministic values:
//!
//! ```
//! use openapidocs_core::mk::v3::examples::{ExampleGenerator, ScalarExampleHandler};
//! use serde_json::json;
//!
//! let generator = ExampleGenerator::default()
//!     .with_handler(ScalarExampleHandler::integer().with_format("int32", || json!(42)));
//!
//! let example = generator.example_from_schema(&json!({"type": "integer", "format": "int32"}));
//! assert_eq!(example, json!(42));
//! ```

// Internal imports (std, crate)
use std::sync::Arc;

use crate::normalize::Node;

// External imports (alphabetized)
use indexmap::IndexMap;
use rand::Rng;
use serde_json::{json, Map};
use uuid::Uuid;

/// Produces a value for a format.
pub type FormatValue = Arc<dyn Fn() -> Node + Send + Sync>;

/// Produces examples for schemas of one type.
pub trait SchemaExampleHandler: Send + Sync {
    /// Value of the schema `type` this handler serves.
    fn type_name(&self) -> &str;

    fn get_example(&self, schema: &Node, generator: &ExampleGenerator) -> Node;
}

/// Handler for scalar types: a value per format, or a default value.
#[derive(Clone)]
pub struct ScalarExampleHandler {
    type_name: String,
    default: Node,
    formats: IndexMap<String, FormatValue>,
}

impl std::fmt::Debug for ScalarExampleHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarExampleHandler")
            .field("type_name", &self.type_name)
            .field("default", &self.default)
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ScalarExampleHandler {
    pub fn new<S: Into<String>>(type_name: S, default: Node) -> Self {
        Self {
            type_name: type_name.into(),
            default,
            formats: IndexMap::new(),
        }
    }

    /// Sets the value generator of a format, replacing any previous one.
    pub fn with_format<S, F>(mut self, format: S, value: F) -> Self
    where
        S: Into<String>,
        F: Fn() -> Node + Send + Sync + 'static,
    {
        self.formats.insert(format.into(), Arc::new(value));
        self
    }

    pub fn string() -> Self {
        Self::new("string", json!("string"))
            .with_format("email", || json!("derp@meme.org"))
            .with_format("uuid", || json!(Uuid::new_v4().to_string()))
            .with_format("date", || json!("2022-04-13"))
            .with_format("date-time", || json!("2022-04-13T15:42:05.901Z"))
            .with_format("password", || json!("************"))
            .with_format("byte", || json!("TG9yZW0gaXBzdW0gZG9sb3Igc2l0IGFtZXQ="))
            .with_format("binary", || json!("TG9yZW0gaXBzdW0gZG9sb3Igc2l0IGFtZXQ="))
    }

    pub fn integer() -> Self {
        Self::new("integer", json!(0))
            .with_format("int32", random_integer)
            .with_format("int64", random_integer)
    }

    pub fn boolean() -> Self {
        Self::new("boolean", json!(true))
    }

    pub fn number() -> Self {
        Self::new("number", json!(10.12))
            .with_format("float", || json!(10.12))
            .with_format("double", || json!(10.12))
    }

    fn scalar_example(&self, schema: &Node) -> Node {
        schema
            .get("format")
            .and_then(Node::as_str)
            .and_then(|format| self.formats.get(format))
            .map_or_else(|| self.default.clone(), |value| value())
    }
}

impl SchemaExampleHandler for ScalarExampleHandler {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get_example(&self, schema: &Node, _generator: &ExampleGenerator) -> Node {
        // the first enum value wins over the format
        if self.type_name == "string" {
            if let Some(first) = schema
                .get("enum")
                .and_then(Node::as_array)
                .and_then(|values| values.first())
            {
                return first.clone();
            }
        }
        self.scalar_example(schema)
    }
}

fn random_integer() -> Node {
    json!(rand::thread_rng().gen_range(0..300))
}

/// Handler for `object` schemas: an example per property.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectExampleHandler;

impl SchemaExampleHandler for ObjectExampleHandler {
    fn type_name(&self) -> &str {
        "object"
    }

    fn get_example(&self, schema: &Node, generator: &ExampleGenerator) -> Node {
        let mut example = Map::new();
        if let Some(properties) = schema.get("properties").and_then(Node::as_object) {
            for (name, property) in properties {
                example.insert(name.clone(), generator.example_from_schema(property));
            }
        }
        Node::Object(example)
    }
}

/// Handler for `array` schemas: a single item, or one item per entry when
/// `items` is a list.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayExampleHandler;

impl SchemaExampleHandler for ArrayExampleHandler {
    fn type_name(&self) -> &str {
        "array"
    }

    fn get_example(&self, schema: &Node, generator: &ExampleGenerator) -> Node {
        match schema.get("items") {
            Some(Node::Array(items)) => Node::Array(
                items
                    .iter()
                    .map(|item| generator.example_from_schema(item))
                    .collect(),
            ),
            Some(items) => Node::Array(vec![generator.example_from_schema(items)]),
            None => Node::Array(Vec::new()),
        }
    }
}

/// Registry of example handlers by schema type.
pub struct ExampleGenerator {
    handlers: IndexMap<String, Box<dyn SchemaExampleHandler>>,
}

impl Default for ExampleGenerator {
    fn default() -> Self {
        Self::empty()
            .with_handler(ScalarExampleHandler::string())
            .with_handler(ScalarExampleHandler::integer())
            .with_handler(ScalarExampleHandler::boolean())
            .with_handler(ScalarExampleHandler::number())
            .with_handler(ObjectExampleHandler)
            .with_handler(ArrayExampleHandler)
    }
}

impl std::fmt::Debug for ExampleGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExampleGenerator")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ExampleGenerator {
    /// A generator without handlers: every typed schema is returned as is.
    pub fn empty() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }

    /// Registers a handler under its type name, replacing any previous one.
    pub fn with_handler<H: SchemaExampleHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers
            .insert(handler.type_name().to_string(), Box::new(handler));
        self
    }

    /// Returns an example for a schema whose references are already expanded.
    ///
    /// An explicit `example` is returned verbatim. A schema without `type` has
    /// no example (`null`); a schema with an unknown type is returned as is.
    pub fn example_from_schema(&self, schema: &Node) -> Node {
        let Node::Object(map) = schema else {
            return Node::Null;
        };
        if let Some(example) = map.get("example") {
            return example.clone();
        }
        match map.get("type") {
            None | Some(Node::Null) => Node::Null,
            Some(Node::String(type_name)) if type_name.is_empty() => Node::Null,
            Some(type_name) => match type_name.as_str().and_then(|t| self.handlers.get(t)) {
                Some(handler) => handler.get_example(schema, self),
                None => schema.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn generator() -> ExampleGenerator {
        ExampleGenerator::default().with_handler(
            ScalarExampleHandler::integer()
                .with_format("int32", || json!(7))
                .with_format("int64", || json!(8)),
        )
    }

    #[test]
    fn test_explicit_example_wins() {
        let schema = json!({"type": "string", "example": "Tom"});
        assert_eq!(generator().example_from_schema(&schema), json!("Tom"));
    }

    #[test]
    fn test_string_examples() {
        let generator = generator();
        assert_eq!(generator.example_from_schema(&json!({"type": "string"})), json!("string"));
        assert_eq!(
            generator.example_from_schema(&json!({"type": "string", "format": "email"})),
            json!("derp@meme.org")
        );
        assert_eq!(
            generator.example_from_schema(&json!({"type": "string", "format": "date-time"})),
            json!("2022-04-13T15:42:05.901Z")
        );
        assert_eq!(
            generator.example_from_schema(
                &json!({"type": "string", "format": "email", "enum": ["a", "b"]})
            ),
            json!("a")
        );
        let uuid = generator.example_from_schema(&json!({"type": "string", "format": "uuid"}));
        assert!(Uuid::parse_str(uuid.as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_scalar_examples() {
        let generator = generator();
        assert_eq!(generator.example_from_schema(&json!({"type": "integer"})), json!(0));
        assert_eq!(
            generator.example_from_schema(&json!({"type": "integer", "format": "int64"})),
            json!(8)
        );
        assert_eq!(generator.example_from_schema(&json!({"type": "boolean"})), json!(true));
        assert_eq!(generator.example_from_schema(&json!({"type": "number"})), json!(10.12));
        assert_eq!(
            generator.example_from_schema(&json!({"type": "number", "format": "double"})),
            json!(10.12)
        );
    }

    #[test]
    fn test_number_formats_can_be_replaced() {
        let generator = ExampleGenerator::default()
            .with_handler(ScalarExampleHandler::number().with_format("float", || json!(1.5)));
        assert_eq!(
            generator.example_from_schema(&json!({"type": "number", "format": "float"})),
            json!(1.5)
        );
        assert_eq!(
            generator.example_from_schema(&json!({"type": "number", "format": "double"})),
            json!(10.12)
        );
    }

    #[test]
    fn test_random_integers_are_in_range() {
        let generator = ExampleGenerator::default();
        for _ in 0..50 {
            let value = generator
                .example_from_schema(&json!({"type": "integer", "format": "int32"}))
                .as_i64()
                .unwrap();
            assert!((0..300).contains(&value));
        }
    }

    #[test]
    fn test_object_and_array_examples() {
        let schema = json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer", "format": "int32"},
                "name": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string", "example": "cute"}},
                "pair": {"type": "array", "items": [{"type": "boolean"}, {"type": "number"}]}
            }
        });
        assert_eq!(
            generator().example_from_schema(&schema),
            json!({"id": 7, "name": "string", "tags": ["cute"], "pair": [true, 10.12]})
        );
        assert_eq!(
            generator().example_from_schema(&json!({"type": "object"})),
            json!({})
        );
    }

    #[test]
    fn test_untyped_and_unknown_schemas() {
        let generator = generator();
        assert_eq!(generator.example_from_schema(&json!({"oneOf": []})), Node::Null);
        assert_eq!(generator.example_from_schema(&Node::Null), Node::Null);
        let unknown = json!({"type": "file"});
        assert_eq!(generator.example_from_schema(&unknown), unknown);
    }

    #[test]
    fn test_empty_generator_returns_schemas() {
        let schema = json!({"type": "string"});
        assert_eq!(ExampleGenerator::empty().example_from_schema(&schema), schema);
    }
}
