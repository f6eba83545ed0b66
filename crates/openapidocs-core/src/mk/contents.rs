//! Writers producing the text of request and response examples, by content
//! type.

// Internal imports (std, crate)
use crate::error::Result;
use crate::normalize::{Node, Normalize, Normalizer};
use crate::serializer::to_json_string;

/// Writes example values for the content types it handles.
pub trait ContentWriter: Send + Sync {
    fn handle_content_type(&self, content_type: &str) -> bool;

    fn write(&self, value: &Node) -> Result<String>;
}

/// Writes JSON with four spaces of indentation. Handles every content type
/// containing `json`.
#[derive(Debug)]
pub struct JsonContentWriter {
    normalizer: Normalizer,
}

impl Default for JsonContentWriter {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::from_env(),
        }
    }
}

impl JsonContentWriter {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Writes any normalizable value: dates, UUIDs and byte strings are
    /// turned into text first.
    pub fn write_value<T: Normalize + ?Sized>(&self, value: &T) -> Result<String> {
        to_json_string(&self.normalizer.normalize(value))
    }
}

impl ContentWriter for JsonContentWriter {
    fn handle_content_type(&self, content_type: &str) -> bool {
        content_type.to_lowercase().contains("json")
    }

    fn write(&self, value: &Node) -> Result<String> {
        self.write_value(value)
    }
}

/// Writes `application/x-www-form-urlencoded` bodies.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormContentWriter;

impl ContentWriter for FormContentWriter {
    fn handle_content_type(&self, content_type: &str) -> bool {
        content_type.to_lowercase().contains("x-www-form-urlencoded")
    }

    fn write(&self, value: &Node) -> Result<String> {
        let Node::Object(map) = value else {
            // only mappings have a form shape
            return to_json_string(value);
        };
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, item) in map {
            match item {
                Node::String(text) => serializer.append_pair(key, text),
                other => serializer.append_pair(key, &other.to_string()),
            };
        }
        Ok(serializer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_writer_handles_json_types() {
        let writer = JsonContentWriter::default();
        assert!(writer.handle_content_type("application/json"));
        assert!(writer.handle_content_type("application/problem+JSON"));
        assert!(!writer.handle_content_type("text/xml"));
    }

    #[test]
    fn test_json_writer_writes_dates() {
        let writer = JsonContentWriter::new(Normalizer::default());
        let mut value = IndexMap::new();
        value.insert("date", NaiveDate::from_ymd_opt(1986, 5, 30).unwrap());

        assert_eq!(
            writer.write_value(&value).unwrap(),
            "{\n    \"date\": \"1986-05-30\"\n}"
        );
    }

    #[test]
    fn test_json_writer_keeps_non_ascii() {
        let writer = JsonContentWriter::default();
        assert_eq!(
            writer.write(&json!({"name": "Café"})).unwrap(),
            "{\n    \"name\": \"Café\"\n}"
        );
    }

    #[test]
    fn test_form_writer() {
        let writer = FormContentWriter;
        assert!(writer.handle_content_type("application/x-www-form-urlencoded"));
        assert!(!writer.handle_content_type("multipart/form-data"));
        assert_eq!(
            writer
                .write(&json!({"name": "Tom & Jerry", "age": 3, "indoor": true}))
                .unwrap(),
            "name=Tom+%26+Jerry&age=3&indoor=true"
        );
    }
}
