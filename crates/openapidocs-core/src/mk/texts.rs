//! Labels used by the built-in templates.
//!
//! [`Texts`] defaults to English. A translation can be loaded from a YAML or
//! JSON file; labels missing from the file keep their English value.
//!
//! ```yaml
//! responses: Risposte
//! parameters: Parametri di input
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::error::Result;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Labels available to templates as `texts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Texts {
    pub contact: String,
    pub license: String,
    pub content: String,
    pub content_type: String,
    pub email: String,
    pub example: String,
    pub status_code: String,
    pub name: String,
    pub description: String,
    pub links: String,
    pub parameter: String,
    pub parameters: String,
    pub parameter_location: String,
    pub responses: String,
    pub query: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub default: String,
    pub nullable: String,
    pub request_body: String,
    pub no_parameters: String,
    pub schema: String,
    pub schema_of_the_request_body: String,
    pub schema_of_the_response_body: String,
    pub schemas: String,
    pub about_schemas: String,
    pub details: String,
    pub required: String,
    pub properties: String,
    pub yes: String,
    pub no: String,
    pub other_accepted_types: String,
    pub other_possible_types: String,
    pub other_responses: String,
    pub auto_generated_example_note: String,
    pub terms_of_service: String,
    pub servers: String,
    pub url: String,
    pub common_responses: String,
    pub common_responses_about: String,
    pub common_parameters: String,
    pub common_parameters_about: String,
    pub security_schemes: String,
    pub scheme: String,
    pub response_headers: String,
    pub external_docs: String,
    pub for_more_information: String,
    pub tags: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self::english()
    }
}

impl Texts {
    /// The English labels.
    pub fn english() -> Self {
        let s = |value: &str| value.to_string();
        Self {
            contact: s("Contact"),
            license: s("License"),
            content: s("Content"),
            content_type: s("Content type"),
            email: s("Email"),
            example: s("Example"),
            status_code: s("Status code"),
            name: s("Name"),
            description: s("Description"),
            links: s("Links"),
            parameter: s("Parameter"),
            parameters: s("Input parameters"),
            parameter_location: s("In"),
            responses: s("Responses"),
            query: s("Query"),
            type_: s("Type"),
            default: s("Default"),
            nullable: s("Nullable"),
            request_body: s("Request body"),
            no_parameters: s("This operation does not require any input parameter."),
            schema: s("Schema"),
            schema_of_the_request_body: s("Schema of the request body"),
            schema_of_the_response_body: s("Schema of the response body"),
            schemas: s("Schemas"),
            about_schemas: s("Schemas describe the shape of the data exchanged by the API."),
            details: s("Details"),
            required: s("Required"),
            properties: s("Properties"),
            yes: s("Yes"),
            no: s("No"),
            other_accepted_types: s("Other accepted types"),
            other_possible_types: s("Other possible types"),
            other_responses: s("Other responses"),
            auto_generated_example_note: s(
                "This example has been generated automatically from the schema and it is not accurate. Refer to the schema for more information.",
            ),
            terms_of_service: s("Terms of service"),
            servers: s("Servers"),
            url: s("URL"),
            common_responses: s("Common responses"),
            common_responses_about: s(
                "This section describes common responses that are reused across operations.",
            ),
            common_parameters: s("Common parameters"),
            common_parameters_about: s(
                "This section describes common parameters that are reused across operations.",
            ),
            security_schemes: s("Security schemes"),
            scheme: s("Scheme"),
            response_headers: s("Response headers"),
            external_docs: s("More documentation"),
            for_more_information: s("For more information"),
            tags: s("Tags"),
        }
    }

    /// `yes` or `no` label for a flag.
    pub fn get_yes_no(&self, value: bool) -> &str {
        if value {
            &self.yes
        } else {
            &self.no
        }
    }

    /// Loads labels from a YAML or JSON file. JSON is a subset of YAML, so a
    /// single parser reads both.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        log::debug!("Loaded texts from {}", path.as_ref().display());
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_english_defaults() {
        let texts = Texts::default();
        assert_eq!(texts.parameters, "Input parameters");
        assert_eq!(texts.parameter_location, "In");
        assert_eq!(texts.url, "URL");
        assert_eq!(texts.external_docs, "More documentation");
        assert_eq!(texts.get_yes_no(true), "Yes");
        assert_eq!(texts.get_yes_no(false), "No");
    }

    #[test]
    fn test_serialized_keys() {
        let node = serde_json::to_value(Texts::default()).unwrap();
        assert_eq!(node["type"], "Type");
        assert_eq!(node["request_body"], "Request body");
    }

    #[tokio::test]
    async fn test_partial_translation_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("texts.yaml");
        tokio::fs::write(&path, "responses: Risposte\nyes: Sì\ntype: Tipo\n")
            .await
            .unwrap();

        let texts = Texts::from_file(&path).await.unwrap();
        assert_eq!(texts.responses, "Risposte");
        assert_eq!(texts.yes, "Sì");
        assert_eq!(texts.type_, "Tipo");
        assert_eq!(texts.no, "No");
    }

    #[tokio::test]
    async fn test_translation_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("texts.json");
        tokio::fs::write(&path, r#"{"schemas": "Schemi"}"#).await.unwrap();

        let texts = Texts::from_file(&path).await.unwrap();
        assert_eq!(texts.schemas, "Schemi");
        assert_eq!(texts.parameters, "Input parameters");
    }
}
