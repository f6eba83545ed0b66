//! Typed records describing OpenAPI 3.1 documents.
//!
//! Records that did not change since 3.0 are shared with [`crate::v3`]; the
//! ones below either gained fields, lost `nullable` / `example`, or point to
//! the 3.1 schema.

// Internal imports (std, crate)
use crate::elements::{Named, RefOr};
use crate::normalize::{CustomSerializable, Node, Normalize, Normalizer, Raw};
use crate::{openapi_element, wire_enum};

// External imports (alphabetized)
use indexmap::IndexMap;
use serde_json::Number;

pub use crate::elements::Reference;
pub use crate::v3::{
    Contact, Discriminator, Example, ExternalDocs, Link, OAuthFlow, OAuthFlows,
    ParameterLocation, Security, SecurityRequirement, Server, ServerVariable, Tag, Xml,
};

wire_enum! {
    pub enum ValueType {
        Array => "array",
        Boolean => "boolean",
        Integer => "integer",
        Number => "number",
        Object => "object",
        String => "string",
        Null => "null",
    }
}

wire_enum! {
    pub enum ValueFormat {
        Base64 => "base64",
        Binary => "binary",
        Byte => "byte",
        Date => "date",
        DateTime => "date-time",
        Time => "time",
        Duration => "duration",
        Double => "double",
        Float => "float",
        Int32 => "int32",
        Int64 => "int64",
        Password => "password",
        Email => "email",
        IdnEmail => "idn-email",
        Uuid => "uuid",
        PartialTime => "partial-time",
        Hostname => "hostname",
        IdnHostname => "idn-hostname",
        Ipv4 => "ipv4",
        Ipv6 => "ipv6",
        Uri => "uri",
        UriReference => "uri-reference",
        Iri => "iri",
        IriReference => "iri-reference",
        UriTemplate => "uri-template",
        JsonPointer => "json-pointer",
        RelativeJsonPointer => "relative-json-pointer",
        Regex => "regex",
    }
}

wire_enum! {
    pub enum SecuritySchemeType {
        ApiKey => "apiKey",
        Http => "http",
        OAuth2 => "oauth2",
        OpenIdConnect => "openIdConnect",
        MutualTls => "mutualTLS",
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
    /// SPDX license expression
    pub identifier: Option<String>,
}

openapi_element!(License { name, url, identifier });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub summary: Option<String>,
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
    summary,
    description,
    terms_of_service,
    contact,
    license
});

/// A schema type: a single one, or a list of alternatives where `null`
/// entries stay in place.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    One(Named<ValueType>),
    Many(Vec<Option<Named<ValueType>>>),
}

impl From<ValueType> for SchemaType {
    fn from(value: ValueType) -> Self {
        Self::One(Named::Known(value))
    }
}

impl Normalize for SchemaType {
    fn raw(&self) -> Raw<'_> {
        match self {
            Self::One(value) => value.raw(),
            Self::Many(values) => values.raw(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub type_: Option<SchemaType>,
    pub format: Option<Named<ValueFormat>>,
    pub required: Option<Vec<String>>,
    pub properties: Option<IndexMap<String, RefOr<Schema>>>,
    pub default: Option<Node>,
    pub deprecated: Option<bool>,
    pub example: Option<Node>,
    pub external_docs: Option<ExternalDocs>,
    pub ref_: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_encoding: Option<String>,
    pub content_media_type: Option<String>,
    pub max_length: Option<Number>,
    pub min_length: Option<Number>,
    pub maximum: Option<Number>,
    pub minimum: Option<Number>,
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
    pub fn of_type<T: Into<SchemaType>>(type_: T) -> Self {
        Self {
            type_: Some(type_.into()),
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
    description,
    content_encoding,
    content_media_type,
    max_length,
    min_length,
    maximum,
    minimum,
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
pub struct MediaType {
    pub schema: Option<RefOr<Schema>>,
    pub examples: Option<IndexMap<String, RefOr<Example>>>,
    pub encoding: Option<IndexMap<String, Encoding>>,
}

openapi_element!(MediaType { schema, examples, encoding });

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
    pub description: Option<String>,
    pub required: Option<bool>,
}

openapi_element!(RequestBody { content, description, required });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub responses: IndexMap<String, Response>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
    pub operation_id: Option<String>,
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
    summary,
    description,
    external_docs,
    operation_id,
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

/// Written as `{expression: path}`; the path item may be a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub expression: String,
    pub path: RefOr<PathItem>,
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

#[derive(Debug, Clone, PartialEq)]
pub struct MutualTlsSecurity {
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl Default for MutualTlsSecurity {
    fn default() -> Self {
        Self {
            type_: SecuritySchemeType::MutualTls,
            description: None,
        }
    }
}

openapi_element!(MutualTlsSecurity { type_ => "type", description });

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityScheme {
    Http(HttpSecurity),
    ApiKey(ApiKeySecurity),
    OAuth2(OAuth2Security),
    OpenIdConnect(OpenIdConnectSecurity),
    MutualTls(MutualTlsSecurity),
}

impl Normalize for SecurityScheme {
    fn raw(&self) -> Raw<'_> {
        match self {
            Self::Http(scheme) => scheme.raw(),
            Self::ApiKey(scheme) => scheme.raw(),
            Self::OAuth2(scheme) => scheme.raw(),
            Self::OpenIdConnect(scheme) => scheme.raw(),
            Self::MutualTls(scheme) => scheme.raw(),
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
    pub path_items: Option<IndexMap<String, RefOr<PathItem>>>,
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
    path_items,
});

/// Root of an OpenAPI 3.1 document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApi {
    pub openapi: String,
    pub info: Option<Info>,
    pub json_schema_dialect: String,
    pub paths: Option<IndexMap<String, PathItem>>,
    pub servers: Option<Vec<Server>>,
    pub components: Option<Components>,
    pub tags: Option<Vec<Tag>>,
    pub security: Option<Security>,
    pub external_docs: Option<ExternalDocs>,
    pub webhooks: Option<IndexMap<String, RefOr<PathItem>>>,
}

impl Default for OpenApi {
    fn default() -> Self {
        Self {
            openapi: "3.1.1".to_string(),
            info: None,
            json_schema_dialect: "https://json-schema.org/draft/2020-12/schema".to_string(),
            paths: None,
            servers: None,
            components: None,
            tags: None,
            security: None,
            external_docs: None,
            webhooks: None,
        }
    }
}

openapi_element!(OpenApi {
    openapi,
    info,
    json_schema_dialect,
    paths,
    servers,
    components,
    tags,
    security,
    external_docs,
    webhooks,
});

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_root_defaults() {
        let document = OpenApi {
            info: Some(Info::new("Cats API", "1.0.0")),
            ..Default::default()
        };
        assert_eq!(
            Normalizer::default().normalize(&document),
            json!({
                "openapi": "3.1.1",
                "info": {"title": "Cats API", "version": "1.0.0"},
                "jsonSchemaDialect": "https://json-schema.org/draft/2020-12/schema"
            })
        );
    }

    #[test]
    fn test_schema_type_list_keeps_null_entries() {
        let schema = Schema {
            type_: Some(SchemaType::Many(vec![
                Some(ValueType::String.into()),
                None,
                Some(ValueType::Null.into()),
            ])),
            content_media_type: Some("image/png".into()),
            ..Default::default()
        };
        assert_eq!(
            Normalizer::default().normalize(&schema),
            json!({"type": ["string", null, "null"], "contentMediaType": "image/png"})
        );
    }

    #[test]
    fn test_mutual_tls_and_license_identifier() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize(&SecurityScheme::MutualTls(MutualTlsSecurity::default())),
            json!({"type": "mutualTLS"})
        );
        let license = License {
            name: "MIT".into(),
            identifier: Some("MIT".into()),
            ..Default::default()
        };
        assert_eq!(
            normalizer.normalize(&license),
            json!({"name": "MIT", "identifier": "MIT"})
        );
    }

    #[test]
    fn test_webhooks_accept_references() {
        let mut webhooks = IndexMap::new();
        webhooks.insert(
            "newPet".to_string(),
            RefOr::Ref(Reference::new("#/components/pathItems/NewPet").with_summary("New pet")),
        );
        let document = OpenApi {
            webhooks: Some(webhooks),
            ..Default::default()
        };
        let node = Normalizer::default().normalize(&document);
        assert_eq!(
            node["webhooks"],
            json!({"newPet": {"$ref": "#/components/pathItems/NewPet", "summary": "New pet"}})
        );
    }
}
