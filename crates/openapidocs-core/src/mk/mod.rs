//! Generation of documentation artifacts (Markdown, MkDocs pages, PlantUML
//! diagrams) from OpenAPI documents.
//!
//! The helpers in this module are shared by the handlers and are exposed to
//! templates as Tera functions and filters.

// Internal imports (std, crate)
use crate::error::{Error, Result};
use crate::normalize::Node;

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub mod common;
pub mod contents;
pub mod generate;
pub mod md;
pub mod templates;
pub mod texts;
pub mod v3;

pub use common::DocumentsWriter;
pub use generate::generate_document;
pub use templates::{OutputStyle, TeraDocumentsWriter};
pub use texts::Texts;

static ROUTE_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^\}]+\}").expect("valid regex"));

/// Returns the standard reason phrase of an HTTP status code, or an empty
/// string when the value is not a known status code.
pub fn get_http_status_phrase(status_code: &Node) -> String {
    let code = match status_code {
        Node::Number(n) => n.as_u64(),
        Node::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    code.and_then(|c| u16::try_from(c).ok())
        .and_then(|c| reqwest::StatusCode::from_u16(c).ok())
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// Reads a nested value from a mapping, following `keys`.
///
/// Returns `None` when a key is missing or its value is `null`, or when no key
/// is given. Crossing a value that is not a mapping is an error.
pub fn read_dict<'a, S: AsRef<str>>(obj: &'a Node, keys: &[S]) -> Result<Option<&'a Node>> {
    let mut value = obj;
    for (index, key) in keys.iter().enumerate() {
        let Node::Object(map) = value else {
            return Err(Error::InvalidSubPath {
                path: keys[..=index].iter().map(|k| k.as_ref().to_string()).collect(),
            });
        };
        match map.get(key.as_ref()) {
            None | Some(Node::Null) => return Ok(None),
            Some(next) => value = next,
        }
    }
    if keys.is_empty() {
        return Ok(None);
    }
    Ok(Some(value))
}

/// Returns the entries of a mapping sorted by lower-cased key.
pub fn sort_dict(obj: &Node) -> Vec<(String, Node)> {
    let mut items: Vec<(String, Node)> = obj
        .as_object()
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();
    items.sort_by_key(|(key, _)| key.to_lowercase());
    items
}

/// Wraps each `{param}` segment of a route in a `route-param` span.
pub fn highlight_params(route: &str) -> String {
    ROUTE_PARAM
        .replace_all(route, |caps: &Captures| {
            format!(
                "<span class=\"route-param\">{}</span>",
                escape_markup(&caps[0])
            )
        })
        .into_owned()
}

/// Truthiness of a node: null, false, zero and empty containers
/// are falsy.
pub fn is_truthy(value: &Node) -> bool {
    match value {
        Node::Null => false,
        Node::Bool(b) => *b,
        Node::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Node::String(s) => !s.is_empty(),
        Node::Array(items) => !items.is_empty(),
        Node::Object(map) => !map.is_empty(),
    }
}

fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_http_status_phrase() {
        assert_eq!(get_http_status_phrase(&json!(200)), "OK");
        assert_eq!(get_http_status_phrase(&json!("200")), "OK");
        assert_eq!(get_http_status_phrase(&json!("404")), "Not Found");
        assert_eq!(get_http_status_phrase(&json!("foo")), "");
        assert_eq!(get_http_status_phrase(&json!("default")), "");
        assert_eq!(get_http_status_phrase(&json!(70000)), "");
    }

    #[test]
    fn test_read_dict() {
        let data = json!({"a": {"b": {"c": 1}}, "n": null, "x": {}});
        assert_eq!(read_dict(&data, &["a", "b", "c"]).unwrap(), Some(&json!(1)));
        assert_eq!(read_dict(&data, &["a", "z"]).unwrap(), None);
        assert_eq!(read_dict(&data, &["n"]).unwrap(), None);
        assert_eq!(read_dict(&data, &["x a"]).unwrap(), None);
        assert_eq!(read_dict::<&str>(&data, &[]).unwrap(), None);
    }

    #[test]
    fn test_read_dict_invalid_sub_path() {
        let data = json!({"a": {"b": 1}});
        let error = read_dict(&data, &["a", "b", "c"]).unwrap_err();
        match error {
            Error::InvalidSubPath { path } => assert_eq!(path, vec!["a", "b", "c"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sort_dict() {
        let data = json!({"b": 1, "C": 2, "a": 3});
        let keys: Vec<String> = sort_dict(&data).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "C"]);
        assert!(sort_dict(&json!("nope")).is_empty());
    }

    #[test]
    fn test_highlight_params() {
        assert_eq!(
            highlight_params("/api/cats/{id}/toys/{toy_id}"),
            "/api/cats/<span class=\"route-param\">{id}</span>/toys/<span class=\"route-param\">{toy_id}</span>"
        );
        assert_eq!(highlight_params("/api/cats"), "/api/cats");
    }

    #[test]
    fn test_is_truthy() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
        for value in [json!(true), json!(1.5), json!("a"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }
}
