//! Block-style YAML emitter for normalized documents.
//!
//! The output uses four spaces of indentation for nested mappings, and
//! writes sequences without extra indentation under their key, with items
//! introduced by `-   `:
//!
//! ```yaml
//! info:
//!     title: Cats API
//! servers:
//! -   url: https://dev.foo.com
//!     description: Development server
//! ```
//!
//! Mapping order is kept and lines are never wrapped. Quoting of string
//! scalars is delegated to `serde_yaml`, so values that would otherwise read
//! back as numbers, booleans or nulls are quoted (`'200'`, `''`).
//! Strings with line breaks or non-printable characters are written
//! double-quoted with YAML escapes (`\n`, `\N`, `\xNN`).

// Internal imports (std, crate)
use crate::error::Result;
use crate::normalize::Node;

const INDENT: &str = "    ";
const ITEM: &str = "-   ";

/// Writes a node as a YAML document, ending with a newline.
pub fn to_string(node: &Node) -> Result<String> {
    let lines = match node {
        Node::Object(map) if !map.is_empty() => mapping_lines(map)?,
        Node::Array(items) if !items.is_empty() => sequence_lines(items)?,
        other => vec![scalar(other)?],
    };
    let mut text = lines.join("\n");
    text.push('\n');
    Ok(text)
}

fn mapping_lines(map: &serde_json::Map<String, Node>) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (key, value) in map {
        let key = string_scalar(key)?;
        match value {
            Node::Object(inner) if !inner.is_empty() => {
                lines.push(format!("{key}:"));
                lines.extend(
                    mapping_lines(inner)?
                        .into_iter()
                        .map(|line| format!("{INDENT}{line}")),
                );
            }
            Node::Array(items) if !items.is_empty() => {
                lines.push(format!("{key}:"));
                lines.extend(sequence_lines(items)?);
            }
            other => lines.push(format!("{key}: {}", scalar(other)?)),
        }
    }
    Ok(lines)
}

fn sequence_lines(items: &[Node]) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for item in items {
        let nested = match item {
            Node::Object(map) if !map.is_empty() => mapping_lines(map)?,
            Node::Array(inner) if !inner.is_empty() => sequence_lines(inner)?,
            other => {
                lines.push(format!("{ITEM}{}", scalar(other)?));
                continue;
            }
        };
        for (index, line) in nested.into_iter().enumerate() {
            let prefix = if index == 0 { ITEM } else { INDENT };
            lines.push(format!("{prefix}{line}"));
        }
    }
    Ok(lines)
}

/// Inline form of a scalar or of an empty collection.
fn scalar(node: &Node) -> Result<String> {
    Ok(match node {
        Node::Null => "null".to_string(),
        Node::Bool(value) => value.to_string(),
        Node::Number(value) => value.to_string(),
        Node::String(value) => string_scalar(value)?,
        Node::Object(_) => "{}".to_string(),
        Node::Array(_) => "[]".to_string(),
    })
}

fn string_scalar(value: &str) -> Result<String> {
    if value.chars().any(needs_escape) {
        return Ok(double_quoted(value));
    }
    let text = serde_yaml::to_string(value)?;
    let text = text.trim_end_matches('\n');
    if text.contains('\n') {
        return Ok(double_quoted(value));
    }
    Ok(text.to_string())
}

/// Characters YAML either reads as line breaks or does not allow raw.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
}

/// YAML double-quoted scalar, with every non-printable character escaped.
fn double_quoted(value: &str) -> String {
    let mut text = String::with_capacity(value.len() + 2);
    text.push('"');
    for c in value.chars() {
        match c {
            '"' => text.push_str("\\\""),
            '\\' => text.push_str("\\\\"),
            '\0' => text.push_str("\\0"),
            '\u{07}' => text.push_str("\\a"),
            '\u{08}' => text.push_str("\\b"),
            '\t' => text.push_str("\\t"),
            '\n' => text.push_str("\\n"),
            '\u{0b}' => text.push_str("\\v"),
            '\u{0c}' => text.push_str("\\f"),
            '\r' => text.push_str("\\r"),
            '\u{1b}' => text.push_str("\\e"),
            '\u{85}' => text.push_str("\\N"),
            '\u{2028}' => text.push_str("\\L"),
            '\u{2029}' => text.push_str("\\P"),
            c if needs_escape(c) => {
                let code = u32::from(c);
                if code <= 0xff {
                    text.push_str(&format!("\\x{code:02X}"));
                } else {
                    text.push_str(&format!("\\u{code:04X}"));
                }
            }
            c => text.push(c),
        }
    }
    text.push('"');
    text
}
