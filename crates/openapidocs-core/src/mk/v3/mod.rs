//! Documentation handler for OpenAPI 3 documents.
//!
//! The handler owns a normalized copy of the document (file references
//! inlined, `components` present) and offers the operations used by the
//! templates: reference resolution and expansion, example synthesis,
//! parameter and content helpers.
//!
//! # Examples
//!
//! ```
//! use openapidocs_core::mk::v3::OpenApiV3DocumentationHandler;
//! use serde_json::json;
//!
//! let handler = OpenApiV3DocumentationHandler::new(json!({
//!     "components": {"schemas": {"Cat": {"type": "object", "properties": {}}}}
//! }), "").unwrap();
//!
//! let cat = handler.resolve_reference("#/components/schemas/Cat").unwrap();
//! assert_eq!(cat, Some(json!({"type": "object", "properties": {}})));
//! ```

// Internal imports (std, crate)
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mk::common::{
    is_array_schema, is_object_schema, is_reference, iter_operations, ref_node_type_name,
    DocumentsWriter, HTTP_METHODS,
};
use crate::mk::contents::{ContentWriter, FormContentWriter, JsonContentWriter};
use crate::mk::templates::{OutputStyle, TeraDocumentsWriter};
use crate::mk::texts::Texts;
use crate::mk::{is_truthy, read_dict, sort_dict};
use crate::normalize::Node;
use crate::source::read_from_file;

// External imports (alphabetized)
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map};

pub mod examples;

use examples::ExampleGenerator;

/// Writer of the documents produced by the V3 handler.
pub type SharedDocumentsWriter = Arc<dyn DocumentsWriter<OpenApiV3DocumentationHandler>>;

/// An example of a content, as shown in the documentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentExample {
    pub value: Node,
    pub auto_generated: bool,
    pub name: String,
}

/// A path and its path item, with request bodies resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEntry {
    pub path: String,
    pub item: Node,
}

/// Values that point at a place of the document.
pub trait AsReference {
    /// The `$ref` value, if any.
    fn reference(&self) -> Option<&str>;
}

impl AsReference for str {
    fn reference(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsReference for String {
    fn reference(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsReference for Node {
    fn reference(&self) -> Option<&str> {
        match self {
            Node::String(value) => Some(value),
            Node::Object(map) => map.get("$ref").and_then(Node::as_str),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ExpandContext {
    expanded_refs: HashSet<String>,
}

/// Documentation handler for OpenAPI 3 documents.
#[derive(Clone)]
pub struct OpenApiV3DocumentationHandler {
    doc: Arc<Node>,
    source: String,
    texts: Arc<Texts>,
    examples: Arc<ExampleGenerator>,
    json_writer: Arc<JsonContentWriter>,
    content_writers: Vec<Arc<dyn ContentWriter>>,
    writer: Option<SharedDocumentsWriter>,
}

impl std::fmt::Debug for OpenApiV3DocumentationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiV3DocumentationHandler")
            .field("source", &self.source)
            .field("examples", &self.examples)
            .finish()
    }
}

impl OpenApiV3DocumentationHandler {
    /// Creates a handler for a document read from `source` (a file path, a
    /// URL, or an empty string when unknown).
    pub fn new(doc: Node, source: &str) -> Result<Self> {
        let doc = Self::normalize_data(doc, source)?;
        Ok(Self {
            doc: Arc::new(doc),
            source: source.to_string(),
            texts: Arc::new(Texts::default()),
            examples: Arc::new(ExampleGenerator::default()),
            json_writer: Arc::new(JsonContentWriter::default()),
            content_writers: vec![Arc::new(FormContentWriter) as Arc<dyn ContentWriter>],
            writer: None,
        })
    }

    pub fn with_texts(mut self, texts: Texts) -> Self {
        self.texts = Arc::new(texts);
        self
    }

    pub fn with_examples(mut self, examples: ExampleGenerator) -> Self {
        self.examples = Arc::new(examples);
        self
    }

    /// Replaces the JSON writer, the default one for content types that no
    /// other writer handles.
    pub fn with_json_writer(mut self, writer: JsonContentWriter) -> Self {
        self.json_writer = Arc::new(writer);
        self
    }

    /// Adds a writer consulted after the JSON writer and the ones already
    /// registered.
    pub fn with_content_writer<W: ContentWriter + 'static>(mut self, writer: W) -> Self {
        self.content_writers.push(Arc::new(writer));
        self
    }

    pub fn with_writer(mut self, writer: SharedDocumentsWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Uses the Tera writer of `style`, with optional custom templates.
    pub fn with_style(self, style: OutputStyle, templates_dir: Option<&Path>) -> Result<Self> {
        let writer = TeraDocumentsWriter::new(style, templates_dir)?;
        Ok(self.with_writer(Arc::new(writer)))
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    pub fn examples(&self) -> &ExampleGenerator {
        &self.examples
    }

    /// Renders the document with the configured writer (MkDocs by default).
    pub fn write(&self) -> Result<String> {
        match &self.writer {
            Some(writer) => writer.write(self),
            None => TeraDocumentsWriter::new(OutputStyle::Mkdocs, None)?.write(self),
        }
    }

    /// Prepares a document: inserts an empty `components` mapping when
    /// missing and inlines references to other files.
    ///
    /// File references are resolved against the directory of `source`, or
    /// against the current directory when the source is unknown.
    pub fn normalize_data(data: Node, source: &str) -> Result<Node> {
        let Node::Object(mut map) = data else {
            return Err(Error::InvalidDocument(
                "the document root must be a mapping".to_string(),
            ));
        };
        if !map.contains_key("components") {
            map.insert("components".to_string(), Node::Object(Map::new()));
        }

        let source_dir = if source.is_empty() {
            std::env::current_dir()?
        } else {
            Path::new(source)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        };
        transform_data(Node::Object(map), &source_dir)
    }

    /// Path items grouped by their single tag (`""` when operations do not
    /// share a tag). Request bodies given by reference are resolved.
    pub fn get_operations(&self) -> Result<IndexMap<String, Vec<PathEntry>>> {
        let mut groups: IndexMap<String, Vec<PathEntry>> = IndexMap::new();
        let Some(paths) = self.doc.get("paths").and_then(Node::as_object) else {
            return Ok(groups);
        };

        for (path, path_item) in paths {
            let tag = self.get_tag(path_item).unwrap_or_default();
            let mut item = path_item.clone();
            if let Some(map) = item.as_object_mut() {
                for (method, operation) in map.iter_mut() {
                    if !HTTP_METHODS.contains(&method.as_str()) {
                        continue;
                    }
                    if let Some(body) = operation.get_mut("requestBody") {
                        *body = self.resolve_opt_ref(body)?;
                    }
                }
            }
            groups.entry(tag).or_default().push(PathEntry {
                path: path.clone(),
                item,
            });
        }
        Ok(groups)
    }

    /// `components.schemas`, sorted by lower-cased name.
    pub fn get_schemas(&self) -> Result<Vec<(String, Node)>> {
        match read_dict(&self.doc, &["components", "schemas"])? {
            Some(schemas) if is_truthy(schemas) => Ok(sort_dict(schemas)),
            _ => Ok(Vec::new()),
        }
    }

    /// The tag shared by the operations of a path item, if there is one.
    pub fn get_tag(&self, path_item: &Node) -> Option<String> {
        let mut single_tag: Option<String> = None;
        for (_, operation) in iter_operations(path_item) {
            let Some(tags) = operation.get("tags").and_then(Node::as_array) else {
                continue;
            };
            if tags.is_empty() {
                continue;
            }
            let next = tags
                .iter()
                .filter_map(Node::as_str)
                .find(|tag| single_tag.as_deref().map_or(true, |current| current == *tag))
                .map(str::to_string);
            single_tag = next;
        }
        single_tag
    }

    /// Resolves a `$ref` inside the document.
    ///
    /// Accepts the reference value (`#/components/schemas/Pet`) or a reference
    /// node. Returns `None` when the target is missing or `null`.
    pub fn resolve_reference<R: AsReference + ?Sized>(&self, reference: &R) -> Result<Option<Node>> {
        let Some(reference) = reference.reference() else {
            return Ok(None);
        };
        let keys: Vec<String> = reference
            .trim_start_matches(['#', '/'])
            .split('/')
            .map(|key| key.replace("~1", "/").replace("~0", "~"))
            .collect();
        Ok(read_dict(&self.doc, &keys)?.cloned())
    }

    /// Resolves `obj` when it is a reference node, otherwise returns a copy.
    pub fn resolve_opt_ref(&self, obj: &Node) -> Result<Node> {
        if is_reference(obj) {
            return Ok(self.resolve_reference(obj)?.unwrap_or(Node::Null));
        }
        Ok(obj.clone())
    }

    /// Replaces references inside a schema with the schemas they point to.
    ///
    /// A reference already expanded while walking the schema becomes `null`,
    /// as does the `items` reference of an array schema pointing to a schema
    /// already in expansion; unresolvable references become `{}`.
    pub fn expand_references(&self, schema: &Node) -> Result<Node> {
        self.expand_with(schema, &mut ExpandContext::default())
    }

    fn expand_with(&self, schema: &Node, context: &mut ExpandContext) -> Result<Node> {
        if is_reference(schema) {
            let resolved = self.resolve_reference(schema)?.unwrap_or(Node::Null);
            return self.expand_references(&resolved);
        }
        let Node::Object(map) = schema else {
            return Ok(schema.clone());
        };

        let mut clone = Map::new();
        for (key, value) in map {
            let expanded = if is_reference(value) {
                let reference = reference_key(value);
                if context.expanded_refs.contains(&reference) {
                    Node::Null
                } else {
                    context.expanded_refs.insert(reference.clone());
                    match self.resolve_reference(value)? {
                        Some(resolved) => self.expand_with(&resolved, context)?,
                        None => {
                            log::warn!("Cannot resolve the reference {}", reference);
                            Node::Object(Map::new())
                        }
                    }
                }
            } else if value.is_object() {
                let cyclic_items = is_array_schema(value)
                    && value
                        .get("items")
                        .filter(|items| is_reference(items))
                        .map_or(false, |items| {
                            context.expanded_refs.contains(&reference_key(items))
                        });
                if cyclic_items {
                    Node::Null
                } else {
                    self.expand_with(value, context)?
                }
            } else {
                value.clone()
            };
            clone.insert(key.clone(), expanded);
        }
        Ok(Node::Object(clone))
    }

    /// Removes from a content mapping the content types whose declaration is
    /// identical to `application/json` or `application/xml`, listing them
    /// under `alt_types` of the canonical entry.
    pub fn simplify_content(&self, content: &Node) -> Node {
        simplify_content(content)
    }

    /// A security scheme of `components.securitySchemes`, or `{}` with a
    /// warning when it is not configured.
    pub fn get_security_scheme(&self, name: &str) -> Node {
        let scheme = read_dict(&self.doc, &["components", "securitySchemes", name])
            .ok()
            .flatten()
            .filter(|scheme| is_truthy(scheme));
        match scheme {
            Some(scheme) => scheme.clone(),
            None => {
                log::warn!("The security scheme {} is not configured.", name);
                Node::Object(Map::new())
            }
        }
    }

    /// Describes a security requirement as a parameter.
    pub fn get_parameter_for_security(&self, key: &str, security_scheme: &Node) -> Node {
        get_parameter_for_security(key, security_scheme)
    }

    /// Security requirements of an operation, or of the document when the
    /// operation declares none.
    pub fn get_operation_security(&self, operation: &Node) -> Option<Node> {
        [operation, self.doc.as_ref()]
            .into_iter()
            .find_map(|source| source.get("security"))
            .cloned()
    }

    /// Parameters of an operation, references resolved and sorted by name.
    /// Parameters describing the security requirements come first.
    pub fn get_parameters(&self, operation: &Node) -> Result<Vec<Node>> {
        let mut results = Vec::new();
        if let Some(parameters) = operation.get("parameters").and_then(Node::as_array) {
            for parameter in parameters {
                let resolved = self.resolve_opt_ref(parameter)?;
                if is_truthy(&resolved) {
                    results.push(resolved);
                }
            }
        }
        results.sort_by_key(|parameter| {
            parameter
                .get("name")
                .and_then(Node::as_str)
                .map(str::to_lowercase)
                .unwrap_or_default()
        });

        let security = self.get_operation_security(operation);
        let Some(options) = security.as_ref().and_then(Node::as_array) else {
            return Ok(results);
        };
        let mut security_parameters = Vec::new();
        for option in options {
            for key in option.as_object().into_iter().flat_map(|map| map.keys()) {
                let scheme = self.get_security_scheme(key);
                security_parameters.push(get_parameter_for_security(key, &scheme));
            }
        }
        security_parameters.extend(results);
        Ok(security_parameters)
    }

    /// Examples of a content: named examples first, then `example`. When the
    /// content has neither, an example is generated from its schema.
    pub fn get_content_examples(&self, data: &Node) -> Result<Vec<ContentExample>> {
        let mut results = Vec::new();
        let examples = data.get("examples").filter(|e| is_truthy(e));

        if let Some(Node::Object(examples)) = examples {
            for (name, definition) in examples {
                let value = match definition {
                    Node::String(_) => definition.clone(),
                    _ if is_reference(definition) => {
                        self.resolve_reference(definition)?.unwrap_or(Node::Null)
                    }
                    _ => definition.get("value").cloned().unwrap_or(Node::Null),
                };
                results.push(ContentExample {
                    value,
                    auto_generated: false,
                    name: name.clone(),
                });
            }
        }

        let mut example = data.get("example").cloned().unwrap_or(Node::Null);
        let mut auto_generated = false;
        if !is_truthy(&example) && examples.is_none() {
            example = self.generate_example_from_schema(data.get("schema").unwrap_or(&Node::Null))?;
            auto_generated = true;
        }
        if is_truthy(&example) {
            results.push(ContentExample {
                value: example,
                auto_generated,
                name: String::new(),
            });
        }
        Ok(results)
    }

    /// Writes an example with the writer of its content type.
    pub fn write_content_example(&self, example: &Node, content_type: &str) -> Result<String> {
        self.get_content_writer(content_type).write(example)
    }

    /// An example for a schema, or `null` for an empty schema.
    pub fn generate_example_from_schema(&self, schema: &Node) -> Result<Node> {
        if !is_truthy(schema) {
            return Ok(Node::Null);
        }
        let schema = self.resolve_opt_ref(schema)?;
        let expanded = self.expand_references(&schema)?;
        Ok(self.examples.example_from_schema(&expanded))
    }

    /// The schema of a content, written as JSON. Empty when there is no
    /// schema.
    pub fn write_content_schema(&self, data: &Node) -> Result<String> {
        let schema = data.get("schema").unwrap_or(&Node::Null);
        if !is_truthy(schema) {
            return Ok(String::new());
        }
        let schema = self.resolve_opt_ref(schema)?;
        self.default_content_writer().write(&schema)
    }

    /// The first writer handling `content_type`, JSON otherwise.
    pub fn get_content_writer(&self, content_type: &str) -> &dyn ContentWriter {
        if self.json_writer.handle_content_type(content_type) {
            return self.default_content_writer();
        }
        self.content_writers
            .iter()
            .find(|writer| writer.handle_content_type(content_type))
            .map_or_else(|| self.default_content_writer(), |writer| writer.as_ref())
    }

    fn default_content_writer(&self) -> &dyn ContentWriter {
        self.json_writer.as_ref()
    }

    /// Properties of a schema (resolved when given by reference), sorted by
    /// lower-cased name.
    pub fn get_properties(&self, schema: &Node) -> Result<Vec<(String, Node)>> {
        let schema = self.resolve_opt_ref(schema)?;
        match schema.get("properties") {
            Some(properties) => Ok(sort_dict(properties)),
            None => Ok(Vec::new()),
        }
    }

    /// Pairs of (schema name, referenced schema name), used to draw the
    /// relations between schemas.
    pub fn iter_schemas_bindings(&self) -> Result<Vec<(String, String)>> {
        let mut bindings = Vec::new();
        for (name, schema) in self.get_schemas()? {
            if is_object_schema(&schema) {
                for (_, property) in self.get_properties(&schema)? {
                    if let Some(type_name) = ref_node_type_name(&property) {
                        bindings.push((name.clone(), type_name.to_string()));
                    }
                    if is_array_schema(&property) {
                        if let Some(type_name) = property.get("items").and_then(ref_node_type_name)
                        {
                            bindings.push((name.clone(), type_name.to_string()));
                        }
                    }
                }
            }
            if is_array_schema(&schema) {
                if let Some(type_name) = schema.get("items").and_then(ref_node_type_name) {
                    bindings.push((name.clone(), type_name.to_string()));
                }
            }
        }
        Ok(bindings)
    }
}

const JSON_CONTENT_TYPE: &str = "application/json";
const XML_CONTENT_TYPE: &str = "application/xml";

/// Removes duplicated content types, see
/// [`OpenApiV3DocumentationHandler::simplify_content`].
pub fn simplify_content(content: &Node) -> Node {
    let Node::Object(map) = content else {
        return content.clone();
    };
    let mut simplified = map.clone();

    let simplifiable: [(&str, fn(&str) -> bool); 2] = [
        (JSON_CONTENT_TYPE, |other| {
            other.contains("json") || other == "text/plain"
        }),
        (XML_CONTENT_TYPE, |other| other.contains("xml")),
    ];

    for (content_type, is_similar) in simplifiable {
        let Some(main) = simplified.get(content_type).cloned() else {
            continue;
        };
        if !is_truthy(&main) {
            continue;
        }
        let mut alt_types: Vec<String> = simplified
            .iter()
            .filter(|(other, declaration)| {
                other.as_str() != content_type && is_similar(other) && **declaration == main
            })
            .map(|(other, _)| other.clone())
            .collect();
        if alt_types.is_empty() {
            continue;
        }

        simplified = simplified
            .into_iter()
            .filter(|(other, _)| !alt_types.contains(other))
            .collect();
        alt_types.sort();
        if let Some(Node::Object(declaration)) = simplified.get_mut(content_type) {
            declaration.insert("alt_types".to_string(), json!(alt_types));
        }
    }
    Node::Object(simplified)
}

fn get_parameter_for_security(key: &str, security_scheme: &Node) -> Node {
    let description = |default: &str| {
        security_scheme
            .get("description")
            .cloned()
            .unwrap_or_else(|| json!(default))
    };
    let schema = json!({"type": "string", "default": "N/A", "nullable": false});

    match security_scheme.get("type").and_then(Node::as_str) {
        Some("http") => {
            let default = match security_scheme.get("scheme").and_then(Node::as_str) {
                Some("bearer") => "JWT Bearer token",
                Some("basic") => "Basic authentication",
                _ => "",
            };
            json!({
                "name": key,
                "in": "header",
                "description": description(default),
                "schema": schema,
            })
        }
        Some("apiKey") => json!({
            "name": key,
            "in": security_scheme.get("in").cloned().unwrap_or(Node::Null),
            "description": description("API key"),
            "schema": schema,
        }),
        _ => json!({
            "name": key,
            "in": "header",
            "description": description(""),
            "schema": schema,
        }),
    }
}

fn reference_key(node: &Node) -> String {
    match node.get("$ref") {
        Some(Node::String(reference)) => reference.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn transform_data(node: Node, source_dir: &Path) -> Result<Node> {
    let Node::Object(map) = node else {
        return Ok(node);
    };
    if map.contains_key("$ref") {
        return handle_obj_ref(Node::Object(map), source_dir);
    }

    let mut clone = Map::new();
    for (key, value) in map {
        let value = match value {
            Node::Array(items) => Node::Array(
                items
                    .into_iter()
                    .map(|item| transform_data(item, source_dir))
                    .collect::<Result<_>>()?,
            ),
            Node::Object(_) => handle_obj_ref(value, source_dir)?,
            other => other,
        };
        clone.insert(key, value);
    }
    Ok(Node::Object(clone))
}

fn handle_obj_ref(node: Node, source_dir: &Path) -> Result<Node> {
    let reference = match node.get("$ref") {
        Some(Node::String(reference)) => reference.clone(),
        Some(_) => return Ok(node),
        None => return transform_data(node, source_dir),
    };
    if reference.starts_with('#') {
        return Ok(node);
    }

    let (file, fragment) = match reference.split_once('#') {
        Some((file, fragment)) => (file, fragment),
        None => (reference.as_str(), ""),
    };
    let referred_file = absolute_path(&source_dir.join(file))?;
    if !referred_file.exists() {
        return Err(Error::ReferencedFileNotFound {
            reference,
            attempted_path: referred_file,
        });
    }

    log::debug!("Handling $ref source: {}", reference);
    let mut sub_fragment = read_from_file(&referred_file)?;
    let keys: Vec<&str> = fragment
        .trim_start_matches('/')
        .split('/')
        .filter(|key| !key.is_empty())
        .collect();
    if !keys.is_empty() {
        sub_fragment = read_dict(&sub_fragment, &keys)?
            .cloned()
            .ok_or_else(|| Error::InvalidSubPath {
                path: keys.iter().map(|key| key.to_string()).collect(),
            })?;
    }

    let parent = referred_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    transform_data(sub_fragment, &parent)
}

/// Absolute form of a path, with `.` and `..` components removed.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
