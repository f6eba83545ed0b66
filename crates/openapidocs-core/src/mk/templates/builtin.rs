//! Templates compiled into the library, by output style.

use super::OutputStyle;

/// Entry template of every style
pub const LAYOUT_TEMPLATE: &str = "layout.html";

macro_rules! view {
    ($folder:literal, $name:literal) => {
        (
            $name,
            include_str!(concat!("../../../templates/", $folder, "/", $name)),
        )
    };
}

const MARKDOWN_COMMON: &[(&str, &str)] = &[
    view!("common", "partial/servers.html"),
    view!("common", "partial/parameters.html"),
    view!("common", "partial/request-body.html"),
    view!("common", "partial/responses.html"),
    view!("common", "partial/schemas.html"),
    view!("common", "partial/type.html"),
    view!("common", "partial/common-responses.html"),
    view!("common", "partial/common-parameters.html"),
    view!("common", "partial/security-schemes.html"),
];

const MKDOCS: &[(&str, &str)] = &[
    view!("views_mkdocs", "layout.html"),
    view!("views_mkdocs", "partial/info.html"),
    view!("views_mkdocs", "partial/path-items.html"),
    view!("views_mkdocs", "partial/content.html"),
];

const MARKDOWN: &[(&str, &str)] = &[
    view!("views_markdown", "layout.html"),
    view!("views_markdown", "partial/info.html"),
    view!("views_markdown", "partial/path-items.html"),
    view!("views_markdown", "partial/content.html"),
];

const PLANTUML_SCHEMAS: &[(&str, &str)] = &[view!("views_plantuml_schemas", "layout.html")];

const PLANTUML_API: &[(&str, &str)] = &[view!("views_plantuml_api", "layout.html")];

/// Built-in templates of a style, as (name, content) pairs
pub fn templates(style: OutputStyle) -> Vec<(&'static str, &'static str)> {
    match style {
        OutputStyle::Mkdocs => [MARKDOWN_COMMON, MKDOCS].concat(),
        OutputStyle::Markdown => [MARKDOWN_COMMON, MARKDOWN].concat(),
        OutputStyle::PlantumlSchemas => PLANTUML_SCHEMAS.to_vec(),
        OutputStyle::PlantumlApi => PLANTUML_API.to_vec(),
    }
}
