use super::error::ModelError;
use super::load::{HttpBinding, HttpFieldRef, HttpMethodBinding};
use super::types::{
    FieldInfo, HttpFieldInfo, HttpMethodInfo, HttpResponseInfo, HttpServiceInfo, MethodInfo,
    ServiceInfo, ServiceType,
};

impl ServiceInfo {
    /// Resolve the declared type of `field` against this service.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownType`] when the type name (or any type
    /// nested inside it) names neither a built-in type nor a DTO or enum of
    /// this service.
    pub fn get_field_type(&self, field: &FieldInfo) -> Result<ServiceType<'_>, ModelError> {
        self.resolve_type(&field.type_name)
    }

    /// Resolve a type name such as `string`, `Widget[]`, `result<int32[]>`
    /// or `map<Color>`.
    ///
    /// The `[]` suffix binds loosest, so `result<int32>[]` is an array of
    /// results.
    pub fn resolve_type(&self, type_name: &str) -> Result<ServiceType<'_>, ModelError> {
        let name = type_name.trim();

        if let Some(inner) = name.strip_suffix("[]") {
            return Ok(ServiceType::Array(Box::new(self.resolve_type(inner)?)));
        }
        if let Some(inner) = strip_wrapper(name, "result") {
            return Ok(ServiceType::Result(Box::new(self.resolve_type(inner)?)));
        }
        if let Some(inner) = strip_wrapper(name, "map") {
            return Ok(ServiceType::Map(Box::new(self.resolve_type(inner)?)));
        }

        let ty = match name {
            "string" => ServiceType::String,
            "boolean" => ServiceType::Boolean,
            "double" => ServiceType::Double,
            "decimal" => ServiceType::Decimal,
            "int32" => ServiceType::Int32,
            "int64" => ServiceType::Int64,
            "bytes" => ServiceType::Bytes,
            "object" => ServiceType::Object,
            "error" => ServiceType::Error,
            _ => {
                if let Some(dto) = self.find_dto(name) {
                    ServiceType::Dto(dto)
                } else if let Some(en) = self.find_enum(name) {
                    ServiceType::Enum(en)
                } else {
                    return Err(ModelError::UnknownType {
                        type_name: type_name.to_string(),
                    });
                }
            }
        };
        Ok(ty)
    }
}

fn strip_wrapper<'n>(name: &'n str, wrapper: &str) -> Option<&'n str> {
    name.strip_prefix(wrapper)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}

impl HttpServiceInfo {
    /// Link a precomputed HTTP binding to the service it describes.
    ///
    /// Request-side references (path, query, request headers, request body,
    /// request normal fields) resolve against the method's request fields;
    /// response-side references resolve against its response fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for references to unknown methods or fields,
    /// unknown verbs and out-of-range status codes.
    pub fn resolve(service: &ServiceInfo, binding: &HttpBinding) -> Result<Self, ModelError> {
        let methods = binding
            .methods
            .iter()
            .map(|m| resolve_method(service, m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HttpServiceInfo {
            url: binding.url.clone(),
            methods,
        })
    }
}

fn resolve_method(
    service: &ServiceInfo,
    binding: &HttpMethodBinding,
) -> Result<HttpMethodInfo, ModelError> {
    let method = service
        .find_method(&binding.method)
        .ok_or_else(|| ModelError::UnknownMethod {
            method: binding.method.clone(),
        })?;

    let verb = http::Method::from_bytes(binding.verb.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| ModelError::InvalidVerb {
            method: method.name.clone(),
            verb: binding.verb.clone(),
        })?;

    let request = |refs: &[HttpFieldRef]| resolve_fields(method, Side::Request, refs);
    let response = |refs: &[HttpFieldRef]| resolve_fields(method, Side::Response, refs);

    let request_body_field = binding
        .request_body_field
        .as_ref()
        .map(|r| resolve_field(method, Side::Request, r))
        .transpose()?;

    let mut valid_responses = Vec::with_capacity(binding.responses.len());
    for r in &binding.responses {
        let status = http::StatusCode::from_u16(r.status).map_err(|_| ModelError::InvalidStatus {
            method: method.name.clone(),
            status: r.status,
        })?;
        valid_responses.push(HttpResponseInfo {
            status_code: status.as_u16(),
            body_field: r
                .body_field
                .as_ref()
                .map(|f| resolve_field(method, Side::Response, f))
                .transpose()?,
            normal_fields: response(&r.normal_fields)?,
        });
    }

    Ok(HttpMethodInfo {
        service_method: method.clone(),
        method: verb.as_str().to_string(),
        path: binding.path.clone(),
        path_fields: request(&binding.path_fields)?,
        query_fields: request(&binding.query_fields)?,
        request_header_fields: request(&binding.request_header_fields)?,
        request_body_field,
        request_normal_fields: request(&binding.request_normal_fields)?,
        response_header_fields: response(&binding.response_header_fields)?,
        valid_responses,
    })
}

#[derive(Clone, Copy)]
enum Side {
    Request,
    Response,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Side::Request => "request",
            Side::Response => "response",
        }
    }
}

fn resolve_fields(
    method: &MethodInfo,
    side: Side,
    refs: &[HttpFieldRef],
) -> Result<Vec<HttpFieldInfo>, ModelError> {
    refs.iter().map(|r| resolve_field(method, side, r)).collect()
}

fn resolve_field(
    method: &MethodInfo,
    side: Side,
    field_ref: &HttpFieldRef,
) -> Result<HttpFieldInfo, ModelError> {
    let fields = match side {
        Side::Request => &method.request_fields,
        Side::Response => &method.response_fields,
    };
    let field_name = field_ref.field_name();
    let field = fields
        .iter()
        .find(|f| f.name == field_name)
        .ok_or_else(|| ModelError::UnknownField {
            method: method.name.clone(),
            side: side.as_str(),
            field: field_name.to_string(),
        })?;
    Ok(HttpFieldInfo {
        name: field_ref.wire_name().to_string(),
        service_field: field.clone(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::types::{DtoInfo, EnumInfo, ServiceTypeKind};

    fn service() -> ServiceInfo {
        ServiceInfo {
            name: "WidgetApi".into(),
            dtos: vec![DtoInfo {
                name: "Widget".into(),
                ..Default::default()
            }],
            enums: vec![EnumInfo {
                name: "Color".into(),
                ..Default::default()
            }],
            methods: vec![MethodInfo {
                name: "getWidget".into(),
                request_fields: vec![FieldInfo {
                    name: "id".into(),
                    type_name: "string".into(),
                    ..Default::default()
                }],
                response_fields: vec![FieldInfo {
                    name: "widget".into(),
                    type_name: "Widget".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_primitives() {
        let svc = service();
        for (name, kind) in [
            ("string", ServiceTypeKind::String),
            ("boolean", ServiceTypeKind::Boolean),
            ("double", ServiceTypeKind::Double),
            ("decimal", ServiceTypeKind::Decimal),
            ("int32", ServiceTypeKind::Int32),
            ("int64", ServiceTypeKind::Int64),
            ("bytes", ServiceTypeKind::Bytes),
            ("object", ServiceTypeKind::Object),
            ("error", ServiceTypeKind::Error),
        ] {
            assert_eq!(svc.resolve_type(name).unwrap().kind(), kind, "{name}");
        }
    }

    #[test]
    fn test_resolve_named_types() {
        let svc = service();
        assert!(matches!(svc.resolve_type("Widget").unwrap(), ServiceType::Dto(d) if d.name == "Widget"));
        assert!(matches!(svc.resolve_type("Color").unwrap(), ServiceType::Enum(e) if e.name == "Color"));
    }

    #[test]
    fn test_array_suffix_binds_loosest() {
        let svc = service();
        match svc.resolve_type("result<int32>[]").unwrap() {
            ServiceType::Array(inner) => assert_eq!(inner.kind(), ServiceTypeKind::Result),
            other => panic!("expected array, got {other:?}"),
        }
        match svc.resolve_type("result<int32[]>").unwrap() {
            ServiceType::Result(inner) => assert_eq!(inner.kind(), ServiceTypeKind::Array),
            other => panic!("expected result, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_nested_map() {
        let svc = service();
        let ty = svc.resolve_type("map<Widget[]>").unwrap();
        let ServiceType::Map(inner) = ty else {
            panic!("expected map");
        };
        let ServiceType::Array(element) = *inner else {
            panic!("expected array");
        };
        assert!(matches!(*element, ServiceType::Dto(_)));
    }

    #[test]
    fn test_unknown_type_is_error() {
        let svc = service();
        let err = svc.resolve_type("map<Gadget>").unwrap_err();
        assert!(matches!(err, ModelError::UnknownType { ref type_name } if type_name == "Gadget"));
        assert!(svc.resolve_type("result<>").is_err());
    }

    #[test]
    fn test_resolve_http_binding() {
        let svc = service();
        let binding: HttpBinding = serde_yaml::from_str(
            r#"
url: https://example.com/
methods:
  - method: getWidget
    verb: get
    path: /widgets/{id}
    path_fields: [id]
    responses:
      - status: 200
        body_field: widget
      - status: 304
"#,
        )
        .unwrap();
        let http = HttpServiceInfo::resolve(&svc, &binding).unwrap();
        let m = http.find_method("getWidget").unwrap();
        assert_eq!(m.method, "GET");
        assert_eq!(m.path_fields[0].service_field.name, "id");
        assert_eq!(m.valid_responses.len(), 2);
        assert_eq!(
            m.valid_responses[0].body_field.as_ref().unwrap().service_field.type_name,
            "Widget"
        );
    }

    #[test]
    fn test_binding_field_from_wrong_side_is_error() {
        let svc = service();
        let binding: HttpBinding = serde_yaml::from_str(
            r#"
methods:
  - method: getWidget
    verb: GET
    path: /widgets
    query_fields: [{ name: w, field: widget }]
"#,
        )
        .unwrap();
        let err = HttpServiceInfo::resolve(&svc, &binding).unwrap_err();
        assert!(matches!(err, ModelError::UnknownField { side: "request", .. }));
    }

    #[test]
    fn test_binding_invalid_status_and_method() {
        let svc = service();
        let bad_status: HttpBinding = serde_yaml::from_str(
            "methods: [{ method: getWidget, verb: GET, path: /, responses: [{ status: 1000 }] }]",
        )
        .unwrap();
        assert!(matches!(
            HttpServiceInfo::resolve(&svc, &bad_status).unwrap_err(),
            ModelError::InvalidStatus { status: 1000, .. }
        ));

        let bad_method: HttpBinding =
            serde_yaml::from_str("methods: [{ method: nope, verb: GET, path: / }]").unwrap();
        assert!(matches!(
            HttpServiceInfo::resolve(&svc, &bad_method).unwrap_err(),
            ModelError::UnknownMethod { .. }
        ));

        let bad_verb: HttpBinding =
            serde_yaml::from_str("methods: [{ method: getWidget, verb: 'GE T', path: / }]").unwrap();
        assert!(matches!(
            HttpServiceInfo::resolve(&svc, &bad_verb).unwrap_err(),
            ModelError::InvalidVerb { .. }
        ));
    }

    #[test]
    fn test_binding_accepts_every_standard_verb() {
        let svc = service();
        for verb in ["trace", "CONNECT", "Patch"] {
            let binding: HttpBinding = serde_yaml::from_str(&format!(
                "methods: [{{ method: getWidget, verb: {verb}, path: / }}]"
            ))
            .unwrap();
            let http = HttpServiceInfo::resolve(&svc, &binding).unwrap();
            assert_eq!(http.methods[0].method, verb.to_ascii_uppercase());
        }
    }
}
