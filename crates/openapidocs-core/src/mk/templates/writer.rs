//! Rendering of documentation handlers through Tera templates.

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mk::common::{
    get_ref_type_name, is_reference, DocumentsWriter, HTTP_METHODS, SCALAR_TYPES,
};
use crate::mk::md::{normalize_link, write_table};
use crate::mk::v3::OpenApiV3DocumentationHandler;
use crate::mk::{get_http_status_phrase, highlight_params, read_dict, sort_dict};

use super::builtin::{self, LAYOUT_TEMPLATE};
use super::{OutputStyle, TemplatesDir};

// External imports (alphabetized)
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

/// Writes documents with the templates of an output style
#[derive(Debug, Clone)]
pub struct TeraDocumentsWriter {
    style: OutputStyle,
    /// Templates and helpers shared by every render
    tera: Arc<Tera>,
}

impl TeraDocumentsWriter {
    /// Loads the built-in templates of `style`, replaced by the ones found in
    /// `templates_dir` when given.
    pub fn new(style: OutputStyle, templates_dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();
        // Markdown and PlantUML are not HTML
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(builtin::templates(style))?;

        if let Some(dir) = templates_dir {
            let dir = TemplatesDir::new(dir)?;
            let files = dir.templates()?;
            log::debug!(
                "Loading {} custom templates from {}",
                files.len(),
                dir.root_dir().display()
            );
            tera.add_template_files(
                files
                    .iter()
                    .map(|(path, name)| (path.as_path(), Some(name.as_str())))
                    .collect::<Vec<_>>(),
            )?;
        }

        register_helpers(&mut tera);
        Ok(Self {
            style,
            tera: Arc::new(tera),
        })
    }

    pub fn style(&self) -> OutputStyle {
        self.style
    }

    /// Renders the layout template for a handler
    pub fn render(&self, handler: &OpenApiV3DocumentationHandler) -> Result<String> {
        let mut tera = (*self.tera).clone();
        register_handler_functions(&mut tera, handler);

        let mut context = Context::from_value(handler.doc().clone())?;
        context.insert("doc", handler.doc());
        context.insert("operations", &handler.get_operations()?);
        context.insert("texts", handler.texts());
        context.insert("scalar_types", &SCALAR_TYPES);
        context.insert("http_methods", &HTTP_METHODS);
        context.insert("style", self.style.as_str());

        let rendered = tera.render(LAYOUT_TEMPLATE, &context).map_err(|e| {
            let message = describe_tera_error(&e);
            log::error!("Failed to render {} for {}: {}", LAYOUT_TEMPLATE, self.style, message);
            Error::template(message)
        })?;
        Ok(collapse_blank_lines(&rendered))
    }
}

impl DocumentsWriter<OpenApiV3DocumentationHandler> for TeraDocumentsWriter {
    fn write(&self, handler: &OpenApiV3DocumentationHandler) -> Result<String> {
        self.render(handler)
    }
}

type Args = HashMap<String, Value>;

fn arg<'a>(args: &'a Args, function: &str, name: &str) -> tera::Result<&'a Value> {
    args.get(name).ok_or_else(|| {
        tera::Error::msg(format!("`{function}` requires the argument `{name}`"))
    })
}

fn str_arg<'a>(args: &'a Args, function: &str, name: &str) -> tera::Result<&'a str> {
    arg(args, function, name)?
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("`{function}`: `{name}` must be a string")))
}

fn to_value<T: Serialize>(value: T) -> tera::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn failed(function: &str, error: Error) -> tera::Error {
    tera::Error::chain(format!("`{function}` failed"), error)
}

fn string_matrix(value: &Value) -> Vec<Vec<String>> {
    value
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    row.as_array()
                        .map(|cells| cells.iter().map(cell_text).collect())
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Filters and functions that do not depend on the document
fn register_helpers(tera: &mut Tera) {
    tera.register_filter("route", |value: &Value, _: &Args| -> tera::Result<Value> {
        Ok(Value::String(highlight_params(&cell_text(value))))
    });
    tera.register_filter("table", |value: &Value, _: &Args| -> tera::Result<Value> {
        Ok(Value::String(write_table(&string_matrix(value), true, 1)))
    });
    tera.register_filter("link", |value: &Value, _: &Args| -> tera::Result<Value> {
        normalize_link(&cell_text(value))
            .map(Value::String)
            .map_err(|e| failed("link", e))
    });

    tera.register_function("read_dict", |args: &Args| -> tera::Result<Value> {
        let obj = arg(args, "read_dict", "obj")?;
        let keys: Vec<String> = match arg(args, "read_dict", "keys")? {
            Value::Array(keys) => keys.iter().map(cell_text).collect(),
            other => cell_text(other).split_whitespace().map(str::to_string).collect(),
        };
        let found = read_dict(obj, &keys).map_err(|e| failed("read_dict", e))?;
        Ok(found
            .cloned()
            .or_else(|| args.get("default").cloned())
            .unwrap_or(Value::Null))
    });
    tera.register_function("sort_dict", |args: &Args| -> tera::Result<Value> {
        to_value(sort_dict(arg(args, "sort_dict", "obj")?))
    });
    tera.register_function("is_reference", |args: &Args| -> tera::Result<Value> {
        Ok(Value::Bool(is_reference(arg(args, "is_reference", "value")?)))
    });
    tera.register_function("get_http_status_phrase", |args: &Args| -> tera::Result<Value> {
        Ok(Value::String(get_http_status_phrase(arg(
            args,
            "get_http_status_phrase",
            "code",
        )?)))
    });
    tera.register_function("write_md_table", |args: &Args| -> tera::Result<Value> {
        let matrix = string_matrix(arg(args, "write_md_table", "matrix")?);
        Ok(Value::String(write_table(&matrix, true, 1)))
    });
    tera.register_function("get_ref_type_name", |args: &Args| -> tera::Result<Value> {
        let name = match arg(args, "get_ref_type_name", "ref")? {
            Value::String(reference) => get_ref_type_name(reference).to_string(),
            other => other
                .get("$ref")
                .and_then(Value::as_str)
                .map(get_ref_type_name)
                .unwrap_or_default()
                .to_string(),
        };
        Ok(Value::String(name))
    });
}

macro_rules! handler_function {
    ($tera:expr, $handler:expr, $name:literal, |$h:ident, $args:ident| $body:expr) => {{
        let $h = $handler.clone();
        $tera.register_function($name, move |$args: &Args| -> tera::Result<Value> {
            $body
        });
    }};
}

/// Functions bound to the handler being rendered
fn register_handler_functions(tera: &mut Tera, handler: &OpenApiV3DocumentationHandler) {
    handler_function!(tera, handler, "get_operations", |h, _args| {
        to_value(h.get_operations().map_err(|e| failed("get_operations", e))?)
    });
    handler_function!(tera, handler, "get_schemas", |h, _args| {
        to_value(h.get_schemas().map_err(|e| failed("get_schemas", e))?)
    });
    handler_function!(tera, handler, "get_tag", |h, args| {
        to_value(h.get_tag(arg(args, "get_tag", "path_item")?))
    });
    handler_function!(tera, handler, "get_parameters", |h, args| {
        let operation = arg(args, "get_parameters", "operation")?;
        to_value(
            h.get_parameters(operation)
                .map_err(|e| failed("get_parameters", e))?,
        )
    });
    handler_function!(tera, handler, "get_content_examples", |h, args| {
        let content = arg(args, "get_content_examples", "content")?;
        to_value(
            h.get_content_examples(content)
                .map_err(|e| failed("get_content_examples", e))?,
        )
    });
    handler_function!(tera, handler, "write_content_example", |h, args| {
        let example = arg(args, "write_content_example", "example")?;
        let content_type = str_arg(args, "write_content_example", "content_type")?;
        h.write_content_example(example, content_type)
            .map(Value::String)
            .map_err(|e| failed("write_content_example", e))
    });
    handler_function!(tera, handler, "write_content_schema", |h, args| {
        let content = arg(args, "write_content_schema", "content")?;
        h.write_content_schema(content)
            .map(Value::String)
            .map_err(|e| failed("write_content_schema", e))
    });
    handler_function!(tera, handler, "generate_example_from_schema", |h, args| {
        let schema = arg(args, "generate_example_from_schema", "schema")?;
        h.generate_example_from_schema(schema)
            .map_err(|e| failed("generate_example_from_schema", e))
    });
    handler_function!(tera, handler, "simplify_content", |h, args| {
        Ok(h.simplify_content(arg(args, "simplify_content", "content")?))
    });
    handler_function!(tera, handler, "resolve_reference", |h, args| {
        let reference = arg(args, "resolve_reference", "ref")?;
        h.resolve_reference(reference)
            .map(Option::unwrap_or_default)
            .map_err(|e| failed("resolve_reference", e))
    });
    handler_function!(tera, handler, "resolve_opt_ref", |h, args| {
        h.resolve_opt_ref(arg(args, "resolve_opt_ref", "obj")?)
            .map_err(|e| failed("resolve_opt_ref", e))
    });
    handler_function!(tera, handler, "expand_references", |h, args| {
        h.expand_references(arg(args, "expand_references", "schema")?)
            .map_err(|e| failed("expand_references", e))
    });
    handler_function!(tera, handler, "get_properties", |h, args| {
        let schema = arg(args, "get_properties", "schema")?;
        to_value(
            h.get_properties(schema)
                .map_err(|e| failed("get_properties", e))?,
        )
    });
    handler_function!(tera, handler, "get_security_scheme", |h, args| {
        Ok(h.get_security_scheme(str_arg(args, "get_security_scheme", "name")?))
    });
    handler_function!(tera, handler, "get_parameter_for_security", |h, args| {
        let key = str_arg(args, "get_parameter_for_security", "key")?;
        let scheme = arg(args, "get_parameter_for_security", "scheme")?;
        Ok(h.get_parameter_for_security(key, scheme))
    });
    handler_function!(tera, handler, "get_operation_security", |h, args| {
        let operation = arg(args, "get_operation_security", "operation")?;
        Ok(h.get_operation_security(operation).unwrap_or_default())
    });
    handler_function!(tera, handler, "iter_schemas_bindings", |h, _args| {
        to_value(
            h.iter_schemas_bindings()
                .map_err(|e| failed("iter_schemas_bindings", e))?,
        )
    });
    handler_function!(tera, handler, "get_yes_no", |h, args| {
        let value = arg(args, "get_yes_no", "value")?;
        Ok(Value::String(
            h.texts().get_yes_no(crate::mk::is_truthy(value)).to_string(),
        ))
    });
}

/// Tera reports the failing template at the top and the cause at the bottom
/// of its error chain.
fn describe_tera_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Keeps at most one blank line between blocks and ends the text with a
/// single newline.
fn collapse_blank_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut blank_lines = 0;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_lines += 1;
            if blank_lines > 1 || output.is_empty() {
                continue;
            }
        } else {
            blank_lines = 0;
        }
        output.push_str(line);
        output.push('\n');
    }
    while output.ends_with("\n\n") {
        output.pop();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn handler(doc: Value) -> OpenApiV3DocumentationHandler {
        OpenApiV3DocumentationHandler::new(doc, "").unwrap()
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("\n\n# A\n\n\n\nb  \n\n"), "# A\n\nb\n");
    }

    #[test]
    fn test_custom_templates_override_builtins() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("layout.html"),
            "{{ '/api/users/{id}' | route }} {{ read_dict(obj=doc, keys='info title') }}",
        )
        .unwrap();

        let writer = TeraDocumentsWriter::new(OutputStyle::Mkdocs, Some(dir.path())).unwrap();
        let output = writer
            .render(&handler(json!({"info": {"title": "Cats API", "version": "1"}})))
            .unwrap();
        assert_eq!(
            output,
            "/api/users/<span class=\"route-param\">{id}</span> Cats API\n"
        );
    }

    #[test]
    fn test_custom_partial_with_builtin_layout() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("partial")).unwrap();
        fs::write(
            dir.path().join("partial").join("info.html"),
            "CUSTOM INFO {{ info.title }}\n",
        )
        .unwrap();

        let writer = TeraDocumentsWriter::new(OutputStyle::Markdown, Some(dir.path())).unwrap();
        let output = writer
            .render(&handler(json!({"info": {"title": "Cats API", "version": "1"}})))
            .unwrap();
        assert!(output.starts_with("CUSTOM INFO Cats API"));
    }

    #[test]
    fn test_empty_custom_directory_uses_builtins() {
        let dir = tempdir().unwrap();
        let writer = TeraDocumentsWriter::new(OutputStyle::Markdown, Some(dir.path())).unwrap();
        let output = writer
            .render(&handler(json!({"info": {"title": "Cats API", "version": "1"}})))
            .unwrap();
        assert!(output.contains("# Cats API"));
    }

    #[test]
    fn test_invalid_custom_directory() {
        let dir = tempdir().unwrap();
        let error =
            TeraDocumentsWriter::new(OutputStyle::Mkdocs, Some(&dir.path().join("missing")))
                .unwrap_err();
        assert!(error.to_string().contains("does not exist"));
    }

    #[test]
    fn test_helpers_in_templates() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("layout.html"),
            "{{ get_http_status_phrase(code='404') }}|{{ 'Get Cats' | link }}|\
             {{ is_reference(value=item) }}|{{ get_ref_type_name(ref=item) }}|\
             {% set pairs = sort_dict(obj=info) %}{% for pair in pairs %}{{ pair.0 }},{% endfor %}|\
             {{ matrix | table }}",
        )
        .unwrap();

        let writer = TeraDocumentsWriter::new(OutputStyle::Mkdocs, Some(dir.path())).unwrap();
        let output = writer
            .render(&handler(json!({
                "info": {"version": "1", "Title": "T"},
                "item": {"$ref": "#/components/schemas/Cat"},
                "matrix": [["a", "b"], ["1", "2"]]
            })))
            .unwrap();
        assert_eq!(
            output,
            "Not Found|get-cats|true|Cat|Title,version,|| a | b |\n| - | - |\n| 1 | 2 |\n"
        );
    }

    #[test]
    fn test_render_error_names_the_cause() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("layout.html"), "{{ get_parameters() }}").unwrap();

        let writer = TeraDocumentsWriter::new(OutputStyle::Mkdocs, Some(dir.path())).unwrap();
        let error = writer.render(&handler(json!({}))).unwrap_err();
        assert!(matches!(error, Error::Template(_)));
        assert!(error.to_string().contains("operation"));
    }
}
