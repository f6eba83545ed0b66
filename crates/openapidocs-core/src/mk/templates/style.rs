//! Output styles of the documentation generator.
//!
//! # Examples
//!
//! ```
//! use openapidocs_core::mk::templates::OutputStyle;
//! use std::str::FromStr;
//!
//! // Styles are parsed from their name or from their number
//! assert_eq!(OutputStyle::from_str("markdown").unwrap(), OutputStyle::Markdown);
//! assert_eq!(OutputStyle::from_str("100").unwrap(), OutputStyle::PlantumlSchemas);
//!
//! assert_eq!(OutputStyle::Mkdocs.as_str(), "MKDOCS");
//! assert_eq!(OutputStyle::Mkdocs.templates_folder(), "views_mkdocs");
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Supported output styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputStyle {
    /// Markdown for MkDocs with the Material theme
    #[default]
    Mkdocs,
    /// Plain Markdown
    Markdown,
    /// PlantUML class diagram of the schemas
    PlantumlSchemas,
    /// PlantUML diagram of the API operations
    PlantumlApi,
}

impl FromStr for OutputStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
            return value
                .parse::<u32>()
                .ok()
                .and_then(Self::from_value)
                .ok_or_else(|| Error::InvalidStyle(s.to_string()));
        }
        Self::all()
            .find(|style| style.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::InvalidStyle(s.to_string()))
    }
}

impl OutputStyle {
    /// Returns the style name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mkdocs => "MKDOCS",
            Self::Markdown => "MARKDOWN",
            Self::PlantumlSchemas => "PLANTUML_SCHEMAS",
            Self::PlantumlApi => "PLANTUML_API",
        }
    }

    /// Returns the style number
    pub fn value(&self) -> u32 {
        match self {
            Self::Mkdocs => 1,
            Self::Markdown => 2,
            Self::PlantumlSchemas => 100,
            Self::PlantumlApi => 101,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        Self::all().find(|style| style.value() == value)
    }

    /// Folder of the templates of this style
    pub fn templates_folder(&self) -> String {
        format!("views_{}", self.as_str().to_lowercase())
    }

    /// Returns an iterator over all output styles
    pub fn all() -> impl Iterator<Item = Self> {
        use OutputStyle::*;
        [Mkdocs, Markdown, PlantumlSchemas, PlantumlApi].iter().copied()
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_as_str_and_value() {
        assert_eq!(OutputStyle::Mkdocs.as_str(), "MKDOCS");
        assert_eq!(OutputStyle::Markdown.as_str(), "MARKDOWN");
        assert_eq!(OutputStyle::PlantumlSchemas.as_str(), "PLANTUML_SCHEMAS");
        assert_eq!(OutputStyle::PlantumlApi.as_str(), "PLANTUML_API");
        assert_eq!(OutputStyle::Mkdocs.value(), 1);
        assert_eq!(OutputStyle::Markdown.value(), 2);
        assert_eq!(OutputStyle::PlantumlSchemas.value(), 100);
        assert_eq!(OutputStyle::PlantumlApi.value(), 101);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("MKDOCS".parse::<OutputStyle>().unwrap(), OutputStyle::Mkdocs);
        assert_eq!("plantuml_api".parse::<OutputStyle>().unwrap(), OutputStyle::PlantumlApi);
        assert_eq!("1".parse::<OutputStyle>().unwrap(), OutputStyle::Mkdocs);
        assert_eq!("2".parse::<OutputStyle>().unwrap(), OutputStyle::Markdown);
        assert_eq!("101".parse::<OutputStyle>().unwrap(), OutputStyle::PlantumlApi);
    }

    #[test]
    fn test_invalid_style() {
        for value in ["WRONG", "3", "", "99999999999"] {
            let error = value.parse::<OutputStyle>().unwrap_err();
            assert!(matches!(error, Error::InvalidStyle(_)), "{value}");
        }
    }

    #[test]
    fn test_templates_folder() {
        assert_eq!(OutputStyle::Markdown.templates_folder(), "views_markdown");
        assert_eq!(
            OutputStyle::PlantumlSchemas.templates_folder(),
            "views_plantuml_schemas"
        );
    }

    #[test]
    fn test_all_styles_are_unique() {
        let styles: Vec<_> = OutputStyle::all().collect();
        let names: HashSet<_> = styles.iter().map(OutputStyle::as_str).collect();
        let values: HashSet<_> = styles.iter().map(OutputStyle::value).collect();
        assert_eq!(styles.len(), 4);
        assert_eq!(names.len(), 4);
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_display_roundtrip() {
        for style in OutputStyle::all() {
            assert_eq!(style.to_string().parse::<OutputStyle>().unwrap(), style);
        }
    }
}
