//! Predicates on schema nodes shared by the documentation handlers.

// Internal imports (std, crate)
use crate::error::Result;
use crate::normalize::Node;

/// Operation keys of a path item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Type names rendered inline rather than as links to a schema.
pub const SCALAR_TYPES: [&str; 4] = ["string", "integer", "boolean", "number"];

/// Produces the text of a document from a documentation handler.
pub trait DocumentsWriter<H>: Send + Sync {
    fn write(&self, handler: &H) -> Result<String>;
}

/// A mapping with a `$ref` key.
pub fn is_reference(data: &Node) -> bool {
    data.as_object().map_or(false, |map| map.contains_key("$ref"))
}

/// A schema of type `object` whose `properties` is a mapping.
pub fn is_object_schema(data: &Node) -> bool {
    data.get("type").and_then(Node::as_str) == Some("object")
        && data.get("properties").map_or(false, Node::is_object)
}

/// A schema of type `array` whose `items` is a mapping.
pub fn is_array_schema(data: &Node) -> bool {
    data.get("type").and_then(Node::as_str) == Some("array")
        && data.get("items").map_or(false, Node::is_object)
}

/// Last segment of a `$ref` value: `#/components/schemas/Pet` gives `Pet`.
pub fn get_ref_type_name(reference: &str) -> &str {
    let trimmed = reference.trim_start_matches(['#', '/']);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Type name of the schema referenced by a reference node.
pub fn ref_node_type_name(data: &Node) -> Option<&str> {
    data.get("$ref").and_then(Node::as_str).map(get_ref_type_name)
}

/// Path item entries that hold operations.
pub fn iter_operations(path_item: &Node) -> impl Iterator<Item = (&String, &Node)> {
    path_item
        .as_object()
        .into_iter()
        .flat_map(|map| map.iter())
        .filter(|(method, operation)| {
            HTTP_METHODS.contains(&method.as_str()) && operation.is_object()
        })
}
