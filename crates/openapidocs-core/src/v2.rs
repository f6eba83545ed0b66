//! Typed records describing Swagger 2.0 documents.
//!
//! See <https://swagger.io/specification/v2/>.

// Internal imports (std, crate)
use crate::elements::{Named, RefOr};
use crate::normalize::{CustomSerializable, Node, Normalize, Normalizer, Raw};
use crate::{openapi_element, wire_enum};

// External imports (alphabetized)
use indexmap::IndexMap;
use serde_json::Number;

pub use crate::elements::Reference;

/// Reference to an entry of `definitions`.
pub fn get_ref(type_name: &str) -> String {
    format!("#/definitions/{type_name}")
}

wire_enum! {
    pub enum ParameterLocation {
        Query => "query",
        Header => "header",
        Path => "path",
        Form => "formData",
        Body => "body",
    }
}

wire_enum! {
    pub enum ApiKeyLocation {
        Query => "query",
        Header => "header",
    }
}

wire_enum! {
    pub enum ValueType {
        Array => "array",
        Boolean => "boolean",
        File => "file",
        Integer => "integer",
        Number => "number",
        Object => "object",
        String => "string",
    }
}

wire_enum! {
    pub enum HeaderType {
        Array => "array",
        Boolean => "boolean",
        Integer => "integer",
        Number => "number",
        String => "string",
    }
}

wire_enum! {
    pub enum ValueItemType {
        Array => "array",
        Boolean => "boolean",
        Integer => "integer",
        Number => "number",
        String => "string",
    }
}

wire_enum! {
    pub enum ValueFormat {
        Binary => "binary",
        Byte => "byte",
        Date => "date",
        DateTime => "date-time",
        Double => "double",
        Float => "float",
        Int32 => "int32",
        Int64 => "int64",
        Password => "password",
    }
}

wire_enum! {
    pub enum CollectionFormat {
        Csv => "csv",
        Ssv => "ssv",
        Tsv => "tsv",
        Pipes => "pipes",
        Multi => "multi",
    }
}

wire_enum! {
    pub enum SecuritySchemeType {
        Basic => "basic",
        ApiKey => "apiKey",
        OAuth2 => "oauth2",
    }
}

wire_enum! {
    pub enum OAuthFlowType {
        Implicit => "implicit",
        Password => "password",
        Application => "application",
        AccessCode => "accessCode",
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

openapi_element!(ExternalDocs { url, description });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
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
    pub properties: Option<IndexMap<String, Schema>>,
    pub default: Option<Node>,
    pub deprecated: Option<bool>,
    pub example: Option<Node>,
    pub external_docs: Option<ExternalDocs>,
    pub ref_: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_length: Option<Number>,
    pub min_length: Option<Number>,
    pub maximum: Option<Number>,
    pub minimum: Option<Number>,
    pub nullable: Option<bool>,
    pub xml: Option<Xml>,
    pub items: Option<Box<Schema>>,
    pub enum_: Option<Vec<String>>,
    pub discriminator: Option<Discriminator>,
    pub all_of: Option<Vec<RefOr<Schema>>>,
    pub any_of: Option<Vec<RefOr<Schema>>>,
    pub one_of: Option<Vec<RefOr<Schema>>>,
    pub not_: Option<Vec<RefOr<Schema>>>,
}

impl Schema {
    pub fn of_type<T: Into<Named<ValueType>>>(type_: T) -> Self {
        Self {
            type_: Some(type_.into()),
            ..Default::default()
        }
    }

    /// Schema pointing to an entry of `definitions`.
    pub fn definition(type_name: &str) -> Self {
        Self {
            ref_: Some(get_ref(type_name)),
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

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub type_: HeaderType,
    pub description: Option<String>,
    pub format: Option<String>,
    pub items: Option<Items>,
    pub collection_format: Option<CollectionFormat>,
    pub default: Option<Node>,
    pub maximum: Option<Number>,
    pub minimum: Option<Number>,
    pub exclusive_maximum: Option<bool>,
    pub exclusive_minimum: Option<bool>,
    pub enum_: Option<Vec<String>>,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<String>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub unique_items: Option<bool>,
    pub multiple_of: Option<Number>,
}

impl Header {
    pub fn new(type_: HeaderType) -> Self {
        Self {
            type_,
            description: None,
            format: None,
            items: None,
            collection_format: None,
            default: None,
            maximum: None,
            minimum: None,
            exclusive_maximum: None,
            exclusive_minimum: None,
            enum_: None,
            max_length: None,
            min_length: None,
            pattern: None,
            max_items: None,
            min_items: None,
            unique_items: None,
            multiple_of: None,
        }
    }
}

openapi_element!(Header {
    type_ => "type",
    description,
    format,
    items,
    collection_format,
    default,
    maximum,
    minimum,
    exclusive_maximum,
    exclusive_minimum,
    enum_ => "enum",
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    multiple_of,
});

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
pub struct Response {
    pub description: String,
    pub headers: Option<IndexMap<String, RefOr<Header>>>,
    pub schema: Option<Schema>,
    pub examples: Option<IndexMap<String, Node>>,
}

impl Response {
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

openapi_element!(Response { description, headers, schema, examples });

#[derive(Debug, Clone, PartialEq)]
pub struct Items {
    pub type_: ValueItemType,
    pub format: Option<ValueFormat>,
    pub items: Option<Box<Items>>,
    pub collection_format: Option<CollectionFormat>,
    pub default: Option<String>,
    pub maximum: Option<Number>,
    pub minimum: Option<Number>,
    pub exclusive_maximum: Option<bool>,
    pub exclusive_minimum: Option<bool>,
    pub enum_: Option<Vec<String>>,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<String>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub unique_items: Option<bool>,
    pub multiple_of: Option<Number>,
}

impl Items {
    pub fn new(type_: ValueItemType) -> Self {
        Self {
            type_,
            format: None,
            items: None,
            collection_format: None,
            default: None,
            maximum: None,
            minimum: None,
            exclusive_maximum: None,
            exclusive_minimum: None,
            enum_: None,
            max_length: None,
            min_length: None,
            pattern: None,
            max_items: None,
            min_items: None,
            unique_items: None,
            multiple_of: None,
        }
    }
}

openapi_element!(Items {
    type_ => "type",
    format,
    items,
    collection_format,
    default,
    maximum,
    minimum,
    exclusive_maximum,
    exclusive_minimum,
    enum_ => "enum",
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    multiple_of,
});

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub in_: ParameterLocation,
    pub type_: Option<ValueType>,
    pub format: Option<ValueFormat>,
    pub items: Option<Items>,
    pub collection_format: Option<CollectionFormat>,
    pub schema: Option<Schema>,
    pub description: Option<String>,
    pub allow_empty_value: Option<bool>,
    pub example: Option<Node>,
    pub examples: Option<IndexMap<String, RefOr<Example>>>,
    pub default: Option<String>,
    pub maximum: Option<Number>,
    pub minimum: Option<Number>,
    pub exclusive_maximum: Option<bool>,
    pub exclusive_minimum: Option<bool>,
    pub enum_: Option<Vec<String>>,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<String>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub unique_items: Option<bool>,
    pub multiple_of: Option<Number>,
    pub required: Option<bool>,
}

impl Parameter {
    pub fn new<S: Into<String>>(name: S, in_: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            in_,
            type_: None,
            format: None,
            items: None,
            collection_format: None,
            schema: None,
            description: None,
            allow_empty_value: None,
            example: None,
            examples: None,
            default: None,
            maximum: None,
            minimum: None,
            exclusive_maximum: None,
            exclusive_minimum: None,
            enum_: None,
            max_length: None,
            min_length: None,
            pattern: None,
            max_items: None,
            min_items: None,
            unique_items: None,
            multiple_of: None,
            required: None,
        }
    }
}

openapi_element!(Parameter {
    name,
    in_,
    type_ => "type",
    format,
    items,
    collection_format,
    schema,
    description,
    allow_empty_value,
    example,
    examples,
    default,
    maximum,
    minimum,
    exclusive_maximum,
    exclusive_minimum,
    enum_ => "enum",
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    multiple_of,
    required,
});

/// Written as `{name: scopes}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityRequirement {
    pub name: String,
    pub value: Vec<String>,
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
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub schemes: Option<Vec<String>>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
    pub parameters: Option<Vec<RefOr<Parameter>>>,
    pub deprecated: Option<bool>,
    pub security: Option<Vec<SecurityRequirement>>,
}

openapi_element!(Operation {
    responses,
    tags,
    operation_id,
    summary,
    consumes,
    produces,
    schemes,
    description,
    external_docs,
    parameters,
    deprecated,
    security,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub ref_: Option<String>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub parameters: Option<Vec<RefOr<Parameter>>>,
}

openapi_element!(PathItem {
    ref_ => "ref",
    get,
    put,
    post,
    delete,
    options,
    head,
    patch,
    parameters,
});

#[derive(Debug, Clone, PartialEq)]
pub struct BasicSecurity {
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl Default for BasicSecurity {
    fn default() -> Self {
        Self {
            type_: SecuritySchemeType::Basic,
            description: None,
        }
    }
}

openapi_element!(BasicSecurity { type_ => "type", description });

#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeySecurity {
    pub name: String,
    pub in_: ApiKeyLocation,
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl ApiKeySecurity {
    pub fn new<S: Into<String>>(name: S, in_: ApiKeyLocation) -> Self {
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
    pub flow: OAuthFlowType,
    pub scopes: IndexMap<String, String>,
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub type_: SecuritySchemeType,
    pub description: Option<String>,
}

impl OAuth2Security {
    pub fn new(flow: OAuthFlowType, scopes: IndexMap<String, String>) -> Self {
        Self {
            flow,
            scopes,
            authorization_url: None,
            token_url: None,
            type_: SecuritySchemeType::OAuth2,
            description: None,
        }
    }
}

openapi_element!(OAuth2Security {
    flow,
    scopes,
    authorization_url,
    token_url,
    type_ => "type",
    description,
});

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityScheme {
    Basic(BasicSecurity),
    ApiKey(ApiKeySecurity),
    OAuth2(OAuth2Security),
}

impl Normalize for SecurityScheme {
    fn raw(&self) -> Raw<'_> {
        match self {
            Self::Basic(scheme) => scheme.raw(),
            Self::ApiKey(scheme) => scheme.raw(),
            Self::OAuth2(scheme) => scheme.raw(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
}

openapi_element!(Tag { name, description, external_docs });

/// Root of a Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApi {
    pub swagger: String,
    pub info: Option<Info>,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Option<Vec<String>>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub paths: Option<IndexMap<String, PathItem>>,
    pub definitions: Option<IndexMap<String, Schema>>,
    pub parameters: Option<IndexMap<String, Parameter>>,
    pub responses: Option<IndexMap<String, Response>>,
    pub security_definitions: Option<IndexMap<String, SecurityScheme>>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub tags: Option<Vec<Tag>>,
    pub external_docs: Option<ExternalDocs>,
}

impl Default for OpenApi {
    fn default() -> Self {
        Self {
            swagger: "2.0".to_string(),
            info: None,
            host: None,
            base_path: None,
            schemes: None,
            consumes: None,
            produces: None,
            paths: None,
            definitions: None,
            parameters: None,
            responses: None,
            security_definitions: None,
            security: None,
            tags: None,
            external_docs: None,
        }
    }
}

openapi_element!(OpenApi {
    swagger,
    info,
    host,
    base_path,
    schemes,
    consumes,
    produces,
    paths,
    definitions,
    parameters,
    responses,
    security_definitions,
    security,
    tags,
    external_docs,
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_ref() {
        assert_eq!(get_ref("Cat"), "#/definitions/Cat");
        assert_eq!(
            Normalizer::default().normalize(&Schema::definition("Cat")),
            json!({"$ref": "#/definitions/Cat"})
        );
    }

    #[test]
    fn test_body_parameter() {
        let mut parameter = Parameter::new("body", ParameterLocation::Body);
        parameter.schema = Some(Schema::definition("Pet"));
        parameter.required = Some(true);
        assert_eq!(
            Normalizer::default().normalize(&parameter),
            json!({
                "name": "body",
                "in": "body",
                "schema": {"$ref": "#/definitions/Pet"},
                "required": true
            })
        );
    }

    #[test]
    fn test_security_definitions() {
        let mut document = OpenApi::default();
        let mut schemes = IndexMap::new();
        schemes.insert(
            "basicAuth".to_string(),
            SecurityScheme::Basic(BasicSecurity::default()),
        );
        schemes.insert(
            "api_key".to_string(),
            SecurityScheme::ApiKey(ApiKeySecurity::new("api_key", ApiKeyLocation::Header)),
        );
        document.security_definitions = Some(schemes);

        assert_eq!(
            Normalizer::default().normalize(&document),
            json!({
                "swagger": "2.0",
                "securityDefinitions": {
                    "basicAuth": {"type": "basic"},
                    "api_key": {"name": "api_key", "in": "header", "type": "apiKey"}
                }
            })
        );
    }
}
