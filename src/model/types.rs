use serde::{Deserialize, Serialize};

/// A service as produced by the definition parser.
///
/// Element order is the declaration order of the source definition and is
/// preserved through to the generated documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    pub name: String,
    pub summary: String,
    pub remarks: Vec<String>,
    pub obsolete: bool,
    pub methods: Vec<MethodInfo>,
    pub dtos: Vec<DtoInfo>,
    pub enums: Vec<EnumInfo>,
    pub error_sets: Vec<ErrorSetInfo>,
}

/// A service method with its request and response fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodInfo {
    pub name: String,
    pub summary: String,
    pub remarks: Vec<String>,
    pub obsolete: bool,
    pub request_fields: Vec<FieldInfo>,
    pub response_fields: Vec<FieldInfo>,
}

/// A named data record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtoInfo {
    pub name: String,
    pub summary: String,
    pub remarks: Vec<String>,
    pub obsolete: bool,
    pub fields: Vec<FieldInfo>,
}

/// A field of a DTO or of a method request/response.
///
/// `type_name` is kept unresolved; see [`ServiceInfo::get_field_type`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub summary: String,
    pub obsolete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumInfo {
    pub name: String,
    pub summary: String,
    pub remarks: Vec<String>,
    pub obsolete: bool,
    pub values: Vec<EnumValueInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValueInfo {
    pub name: String,
    pub summary: String,
    pub obsolete: bool,
}

/// A named set of error codes usable as a method's error channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorSetInfo {
    pub name: String,
    pub summary: String,
    pub remarks: Vec<String>,
    pub obsolete: bool,
    pub errors: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorInfo {
    pub name: String,
    pub summary: String,
    pub obsolete: bool,
}

impl DtoInfo {
    /// Fields that are not marked obsolete, in declaration order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| !f.obsolete)
    }
}

impl EnumInfo {
    /// Values that are not marked obsolete, in declaration order.
    pub fn visible_values(&self) -> impl Iterator<Item = &EnumValueInfo> {
        self.values.iter().filter(|v| !v.obsolete)
    }
}

impl ServiceInfo {
    #[must_use]
    pub fn find_dto(&self, name: &str) -> Option<&DtoInfo> {
        self.dtos.iter().find(|d| d.name == name)
    }

    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<&EnumInfo> {
        self.enums.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// The resolved type of a field.
///
/// Wrapper kinds own exactly one value type and named kinds borrow their
/// aggregate from the [`ServiceInfo`] they were resolved against, so a
/// `Result` without a value type or a `Dto` without a definition cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceType<'a> {
    String,
    Boolean,
    Double,
    Decimal,
    Int32,
    Int64,
    Bytes,
    Object,
    Error,
    Dto(&'a DtoInfo),
    Enum(&'a EnumInfo),
    Result(Box<ServiceType<'a>>),
    Array(Box<ServiceType<'a>>),
    Map(Box<ServiceType<'a>>),
}

/// Discriminant of [`ServiceType`], exposed to templates as `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceTypeKind {
    String,
    Boolean,
    Double,
    Decimal,
    Int32,
    Int64,
    Bytes,
    Object,
    Error,
    Dto,
    Enum,
    Result,
    Array,
    Map,
}

impl ServiceType<'_> {
    #[must_use]
    pub fn kind(&self) -> ServiceTypeKind {
        match self {
            ServiceType::String => ServiceTypeKind::String,
            ServiceType::Boolean => ServiceTypeKind::Boolean,
            ServiceType::Double => ServiceTypeKind::Double,
            ServiceType::Decimal => ServiceTypeKind::Decimal,
            ServiceType::Int32 => ServiceTypeKind::Int32,
            ServiceType::Int64 => ServiceTypeKind::Int64,
            ServiceType::Bytes => ServiceTypeKind::Bytes,
            ServiceType::Object => ServiceTypeKind::Object,
            ServiceType::Error => ServiceTypeKind::Error,
            ServiceType::Dto(_) => ServiceTypeKind::Dto,
            ServiceType::Enum(_) => ServiceTypeKind::Enum,
            ServiceType::Result(_) => ServiceTypeKind::Result,
            ServiceType::Array(_) => ServiceTypeKind::Array,
            ServiceType::Map(_) => ServiceTypeKind::Map,
        }
    }
}

impl ServiceTypeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTypeKind::String => "string",
            ServiceTypeKind::Boolean => "boolean",
            ServiceTypeKind::Double => "double",
            ServiceTypeKind::Decimal => "decimal",
            ServiceTypeKind::Int32 => "int32",
            ServiceTypeKind::Int64 => "int64",
            ServiceTypeKind::Bytes => "bytes",
            ServiceTypeKind::Object => "object",
            ServiceTypeKind::Error => "error",
            ServiceTypeKind::Dto => "dto",
            ServiceTypeKind::Enum => "enum",
            ServiceTypeKind::Result => "result",
            ServiceTypeKind::Array => "array",
            ServiceTypeKind::Map => "map",
        }
    }
}

impl std::fmt::Display for ServiceTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The HTTP binding of a service, resolved against its [`ServiceInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HttpServiceInfo {
    pub url: Option<String>,
    pub methods: Vec<HttpMethodInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpMethodInfo {
    pub service_method: MethodInfo,
    /// Upper-case HTTP verb, e.g. `GET`.
    pub method: String,
    pub path: String,
    pub path_fields: Vec<HttpFieldInfo>,
    pub query_fields: Vec<HttpFieldInfo>,
    pub request_header_fields: Vec<HttpFieldInfo>,
    pub request_body_field: Option<HttpFieldInfo>,
    pub request_normal_fields: Vec<HttpFieldInfo>,
    pub response_header_fields: Vec<HttpFieldInfo>,
    pub valid_responses: Vec<HttpResponseInfo>,
}

/// A field placed in a particular part of the HTTP request or response.
///
/// `name` is the wire name (query parameter, header) and may differ from the
/// service field's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpFieldInfo {
    pub name: String,
    pub service_field: FieldInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponseInfo {
    pub status_code: u16,
    pub body_field: Option<HttpFieldInfo>,
    pub normal_fields: Vec<HttpFieldInfo>,
}

impl HttpServiceInfo {
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&HttpMethodInfo> {
        self.methods.iter().find(|m| m.service_method.name == name)
    }
}
