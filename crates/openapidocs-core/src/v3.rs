//! Typed records describing OpenAPI 3.0 documents.
//!
//! See <https://swagger.io/specification/>. Records are written in the
//! field order declared here.

// Internal imports (std, crate)
use crate::elements::{Named, RefOr};
use crate::normalize::{CustomSerializable, Node, Normalize, Normalizer, Raw};
use crate::{openapi_element, wire_enum};

// External imports (alphabetized)
use indexmap::IndexMap;
use serde_json::Number;

pub use crate::elements::Reference;

wire_enum! {
    pub enum ParameterLocation {
        Query => "query",
        Header => "header",
        Path => "path",
        Cookie => "cookie",
    }
}

wire_enum! {
    pub enum ValueType {
        Array => "array",
        Boolean => "boolean",
        Integer => "integer",
        Number => "number",
        Object => "object",
        String => "string",
    }
}

wire_enum! {
    pub enum ValueFormat {
        Base64 => "base64",
        Binary => "binary",
        Byte => "byte",
        Date => "date",
        DateTime => "date-time",
        Double => "double",
        Float => "float",
        Int32 => "int32",
        Int64 => "int64",
        Password => "password",
        Email => "email",
        Uuid => "uuid",
        PartialTime => "partial-time",
    }
}

wire_enum! {
    pub enum SecuritySchemeType {
        ApiKey => "apiKey",
        Http => "http",
        OAuth2 => "oauth2",
        OpenIdConnect => "openIdConnect",
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

openapi_element!(Contact { name, url, email });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalDocs {
    pub url: String,
    pub description: Option<String>,
}

impl ExternalDocs {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

openapi_element!(ExternalDocs { url, description });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
}

impl License {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

openapi_element!(License { name, url });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
}

impl Info {
    pub fn new<T: Into<String>, V: Into<String>>(title: T, version: V) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Default::default()
        }
    }
}

openapi_element!(Info {
    title,
    version,
    description,
    terms_of_service,
    contact,
    license
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerVariable {
    pub default: String,
    pub description: Option<String>,
    pub enum_: Option<Vec<String>>,
}

openapi_element!(ServerVariable { default, description, enum_ => "enum" });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
    pub variables: Option<IndexMap<String, ServerVariable>>,
}

impl Server {
    pub fn new<U: Into<String>, D: Into<String>>(url: U, description: D) -> Self {
        Self {
            url: url.into(),
            description: Some(description.into()),
            variables: None,
        }
    }
}

openapi_element!(Server { url, description, variables });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Xml {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: Option<bool>,
    pub wrapped: Option<bool>,
}

openapi_element!(Xml { name, namespace, prefix, attribute, wrapped });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discriminator {
    pub property_name: String,
    pub mapping: Option<IndexMap<String, String>>,
}

openapi_element!(Discriminator { property_name, mapping });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub type_: Option<Named<ValueType>>,
    pub format: Option<Named<ValueFormat>>,
    pub required: Option<Vec<String>>,
    pub properties: Option<IndexMap<String, RefOr<Schema>>>,
    pub default: Option<Node>,
    pub deprecated: Option<bool>,
    pub example: Option<Node>,
    pub external_docs: Option<ExternalDocs>,
    pub ref_: Option<String>,
    pub title: Option<String>,
    pub max_length: Option<Number>,
    pub min_length: Option<Number>,
    pub maximum: Option<Number>,
    pub minimum: Option<Number>,
    pub nullable: Option<bool>,
    pub xml: Option<Xml>,
    pub items: Option<Box<RefOr<Schema>>>,
    pub enum_: Option<Vec<String>>,
    pub discriminator: Option<Discriminator>,
    pub all_of: Option<Vec<RefOr<Schema>>>,
    pub any_of: Option<Vec<RefOr<Schema>>>,
    pub one_of: Option<Vec<RefOr<Schema>>>,
    pub not_: Option<Vec<RefOr<Schema>>>,
}

impl Schema {
    /// Schema of the given type, without other constraints.
    pub fn of_type<T: Into<Named<ValueType>>>(type_: T) -> Self {
        Self {
            type_: Some(type_.into()),
            ..Default::default()
        }
    }

    /// Schema made of a `$ref` only.
    pub fn reference<S: Into<String>>(ref_: S) -> Self {
        Self {
            ref_: Some(ref_.into()),
            ..Default::default()
        }
    }
}

openapi_element!(Schema {
    type_ => "type",
    format,
    required,
    properties,
    default,
    deprecated,
    example,
    external_docs,
    ref_ => "ref",
    title,
    max_length,
    min_length,
    maximum,
    minimum,
    nullable,
    xml,
    items,
    enum_ => "enum",
    discriminator,
    all_of,
    any_of,
    one_of,
    not_,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub description: Option<String>,
    pub schema: Option<RefOr<Schema>>,
}

openapi_element!(Header { description, schema });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Node>,
    pub external_value: Option<String>,
}

openapi_element!(Example { summary, description, value, external_value });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoding {
    pub content_type: Option<String>,
    pub headers: Option<IndexMap<String, RefOr<Header>>>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
}

openapi_element!(Encoding {
    content_type,
    headers,
    style,
    explode,
    allow_reserved
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub operation_ref: Option<String>,
    pub operation_id: Option<String>,
    pub parameters: Option<IndexMap<String, Node>>,
    pub request_body: Option<Node>,
    pub description: Option<String>,
    pub server: Option<Server>,
}

openapi_element!(Link {
    operation_ref,
    operation_id,
    parameters,
    request_body,
    description,
    server
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaType {
    pub schema: Option<RefOr<Schema>>,
    pub example: Option<Node>,
    pub examples: Option<IndexMap<String, RefOr<Example>>>,
    pub encoding: Option<IndexMap<String, Encoding>>,
}

impl MediaType {
    pub fn with_schema(schema: RefOr<Schema>) -> Self {
        Self {
            schema: Some(schema),
            ..Default::default()
        }
    }
}

openapi_element!(MediaType { schema, example, examples, encoding });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: Option<String>,
    pub headers: Option<IndexMap<String, RefOr<Header>>>,
    pub content: Option<IndexMap<String, RefOr<MediaType>>>,
    pub links: Option<IndexMap<String, RefOr<Link>>>,
}

impl Response {
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

openapi_element!(Response { description, headers, content, links });

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub in_: ParameterLocation,
    pub schema: Option<RefOr<Schema>>,
    pub content: Option<IndexMap<String, MediaType>>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub example: Option<Node>,
    pub examples: Option<IndexMap<String, RefOr<Example>>>,
}

impl Parameter {
    pub fn new<S: Into<String>>(name: S, in_: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            in_,
            schema: None,
            content: None,
            description: None,
            required: None,
            deprecated: None,
            allow_empty_value: None,
            example: None,
            examples: None,
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(RefOr::Item(schema));
        self
    }
}

openapi_element!(Parameter {
    name,
    in_,
    schema,
    content,
    description,
    required,
    deprecated,
    allow_empty_value,
    example,
    examples,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
    pub required: Option<bool>,
    pub description: Option<String>,
}

openapi_element!(RequestBody { content, required, description });

/// Names a security scheme and the scopes it needs: written as
/// `{name: scopes}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityRequirement {
    pub name: String,
    pub value: Vec<String>,
}

impl SecurityRequirement {
    pub fn new<S: Into<String>>(name: S, value: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl CustomSerializable for SecurityRequirement {
    fn to_wire_form(&self, normalizer: &Normalizer) -> Node {
        let mut data = serde_json::Map::new();
        data.insert(self.name.clone(), normalizer.normalize(&self.value));
        Node::Object(data)
    }
}

impl Normalize for SecurityRequirement {
    fn raw(&self) -> Raw<'_> {
        Raw::Custom(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub responses: IndexMap<String, Response>,
    pub tags: Option<Vec<String>>,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
    pub parameters: Option<Vec<RefOr<Parameter>>>,
    pub request_body: Option<RefOr<RequestBody>>,
    pub callbacks: Option<IndexMap<String, RefOr<Callback>>>,
    pub deprecated: Option<bool>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub servers: Option<Vec<Server>>,
}

openapi_element!(Operation {
    responses,
    tags,
    operation_id,
    summary,
    description,
    external_docs,
    parameters,
    request_body,
    callbacks,
    deprecated,
    security,
    servers,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub summary: Option<String>,
    pub ref_: Option<String>,
    pub description: Option<String>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    pub servers: Option<Vec<Server>>,
    pub parameters: Option<Vec<RefOr<Parameter>>>,
}

openapi_element!(PathItem {
    summary,
    ref_ => "ref",
    description,
    get,
    put,
    post,
    delete,
    options,
    head,
    patch,
    trace,
    servers,
    parameters,
});

/// A runtime expression mapped to the path item describing the callback
/// request: written as `{expression: path}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Callback {
    pub expression: String,
    pub path: PathItem,
}

impl CustomSerializable for Callback {
    fn to_wire_form(&self, normalizer: &Normalizer) -> Node {
        let mut data = serde_json::Map::new();
        data.insert(self.expression.clone(), normalizer.normalize(&self.path));
        Node::Object(data)
    }
}

impl Normalize for Callback {
    fn raw(&self) -> Raw<'_> {
        Raw::Custom(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlow {
    pub scopes: IndexMap<String, String>,
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
}

openapi_element!(OAuthFlow {
    scopes,
    authorization_url,
    token_url,
    refresh_url
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlows {
    pub implicit: Option<OAuthFlow>,
    pub password: Option<OAuthFlow>,
    pub client_credentials: Option<OAuthFlow>,
    pub authorization_code: Option<OAuthFlow>,
}

openapi_element!(OAuthFlows {
    implicit,
    password,
    client_credentials,
    authorization_code
});

#[derive(Debug, Clone, PartialEq)]
pub struct HttpSecurity {
    pub scheme: String,
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
    pub bearer_format: Option<String>,
}

impl HttpSecurity {
    pub fn new<S: Into<String>>(scheme: S) -> Self {
        Self {
            scheme: scheme.into(),
            type_: SecuritySchemeType::Http,
            description: None,
            bearer_format: None,
        }
    }
}

openapi_element!(HttpSecurity {
    scheme,
    type_ => "type",
    description,
    bearer_format
});

#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeySecurity {
    pub name: String,
    pub in_: ParameterLocation,
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl ApiKeySecurity {
    pub fn new<S: Into<String>>(name: S, in_: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            in_,
            type_: SecuritySchemeType::ApiKey,
            description: None,
        }
    }
}

openapi_element!(ApiKeySecurity { name, in_, type_ => "type", description });

#[derive(Debug, Clone, PartialEq)]
pub struct OAuth2Security {
    pub flows: OAuthFlows,
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl OAuth2Security {
    pub fn new(flows: OAuthFlows) -> Self {
        Self {
            flows,
            type_: SecuritySchemeType::OAuth2,
            description: None,
        }
    }
}

openapi_element!(OAuth2Security { flows, type_ => "type", description });

#[derive(Debug, Clone, PartialEq)]
pub struct OpenIdConnectSecurity {
    pub open_id_connect_url: String,
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl OpenIdConnectSecurity {
    pub fn new<S: Into<String>>(open_id_connect_url: S) -> Self {
        Self {
            open_id_connect_url: open_id_connect_url.into(),
            type_: SecuritySchemeType::OpenIdConnect,
            description: None,
        }
    }
}

openapi_element!(OpenIdConnectSecurity {
    open_id_connect_url,
    type_ => "type",
    description
});

/// Any of the supported security schemes.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityScheme {
    Http(HttpSecurity),
    ApiKey(ApiKeySecurity),
    OAuth2(OAuth2Security),
    OpenIdConnect(OpenIdConnectSecurity),
}

impl Normalize for SecurityScheme {
    fn raw(&self) -> Raw<'_> {
        match self {
            Self::Http(scheme) => scheme.raw(),
            Self::ApiKey(scheme) => scheme.raw(),
            Self::OAuth2(scheme) => scheme.raw(),
            Self::OpenIdConnect(scheme) => scheme.raw(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    pub schemas: Option<IndexMap<String, RefOr<Schema>>>,
    pub responses: Option<IndexMap<String, RefOr<Response>>>,
    pub parameters: Option<IndexMap<String, RefOr<Parameter>>>,
    pub examples: Option<IndexMap<String, RefOr<Example>>>,
    pub request_bodies: Option<IndexMap<String, RefOr<RequestBody>>>,
    pub headers: Option<IndexMap<String, RefOr<Header>>>,
    pub security_schemes: Option<IndexMap<String, RefOr<SecurityScheme>>>,
    pub links: Option<IndexMap<String, RefOr<Link>>>,
    pub callbacks: Option<IndexMap<String, RefOr<Callback>>>,
}

openapi_element!(Components {
    schemas,
    responses,
    parameters,
    examples,
    request_bodies,
    headers,
    security_schemes,
    links,
    callbacks,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
}

impl Tag {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, description: D) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            external_docs: None,
        }
    }
}

openapi_element!(Tag { name, description, external_docs });

/// Document-level security: a list of requirements, preceded by `{}` when
/// authentication is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Security {
    pub requirements: Vec<SecurityRequirement>,
    pub optional: bool,
}

impl CustomSerializable for Security {
    fn to_wire_form(&self, normalizer: &Normalizer) -> Node {
        let mut items = Vec::with_capacity(self.requirements.len() + 1);
        if self.optional {
            items.push(Node::Object(serde_json::Map::new()));
        }
        items.extend(self.requirements.iter().map(|item| normalizer.normalize(item)));
        Node::Array(items)
    }
}

impl Normalize for Security {
    fn raw(&self) -> Raw<'_> {
        Raw::Custom(self)
    }
}

/// Root of an OpenAPI 3.0 document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApi {
    pub openapi: String,
    pub info: Option<Info>,
    pub paths: Option<IndexMap<String, PathItem>>,
    pub servers: Option<Vec<Server>>,
    pub components: Option<Components>,
    pub tags: Option<Vec<Tag>>,
    pub security: Option<Security>,
    pub external_docs: Option<ExternalDocs>,
}

impl Default for OpenApi {
    fn default() -> Self {
        Self {
            openapi: "3.0.3".to_string(),
            info: None,
            paths: None,
            servers: None,
            components: None,
            tags: None,
            security: None,
            external_docs: None,
        }
    }
}

openapi_element!(OpenApi {
    openapi,
    info,
    paths,
    servers,
    components,
    tags,
    security,
    external_docs,
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_location_is_written_as_in() {
        let parameter = Parameter::new("search", ParameterLocation::Query)
            .with_schema(Schema::of_type(ValueType::String));
        assert_eq!(
            Normalizer::default().normalize(&parameter),
            json!({"name": "search", "in": "query", "schema": {"type": "string"}})
        );
    }

    #[test]
    fn test_schema_type_accepts_free_text() {
        let schema = Schema {
            type_: Some(Named::other("integer")),
            format: Some(ValueFormat::Int32.into()),
            minimum: Some(0.into()),
            ..Default::default()
        };
        assert_eq!(
            Normalizer::default().normalize(&schema),
            json!({"type": "integer", "format": "int32", "minimum": 0})
        );
    }

    #[test]
    fn test_security_optional_prepends_empty_requirement() {
        let security = Security {
            requirements: vec![SecurityRequirement::new("basicAuth", vec![])],
            optional: true,
        };
        assert_eq!(
            Normalizer::default().normalize(&security),
            json!([{}, {"basicAuth": []}])
        );
    }

    #[test]
    fn test_security_scheme_type_defaults() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize(&SecurityScheme::Http(HttpSecurity::new("basic"))),
            json!({"scheme": "basic", "type": "http"})
        );
        assert_eq!(
            normalizer.normalize(&SecurityScheme::ApiKey(ApiKeySecurity::new(
                "X-API-Key",
                ParameterLocation::Header
            ))),
            json!({"name": "X-API-Key", "in": "header", "type": "apiKey"})
        );
        assert_eq!(
            normalizer.normalize(&OpenIdConnectSecurity::new("https://example.com/.well-known")),
            json!({"openIdConnectUrl": "https://example.com/.well-known", "type": "openIdConnect"})
        );
    }

    #[test]
    fn test_callback_wire_form() {
        let callback = Callback {
            expression: "{$request.query.queryUrl}".into(),
            path: PathItem {
                summary: Some("Callback".into()),
                ..Default::default()
            },
        };
        assert_eq!(
            Normalizer::default().normalize(&callback),
            json!({"{$request.query.queryUrl}": {"summary": "Callback"}})
        );
    }
}
