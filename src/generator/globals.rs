use minijinja::value::{Object, Value};
use minijinja::{Environment, Error, ErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::render::{render_field_type, render_field_type_as_json_value};
use super::status::status_code_phrase;
use crate::model::{HttpServiceInfo, ServiceInfo, ServiceTypeKind};

static EMPTY_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\[([^\]]+)\]\(\)").expect("valid link regex")
});

/// Text of the marker comment placed in every generated file.
///
/// Stale files are only ever cleaned up when they contain this text.
#[must_use]
pub fn code_gen_comment(generator_name: &str) -> String {
    format!("DO NOT EDIT: generated by {generator_name}")
}

/// Variables and functions a template can use.
///
/// | global | meaning |
/// |---|---|
/// | `Service` | the service model |
/// | `HttpService` | the HTTP binding, or none when documenting without HTTP |
/// | `CodeGenCommentText` | see [`code_gen_comment`] |
///
/// Functions: `get_http`, `get_field_type`, `render_field_type`,
/// `render_field_type_as_json_value`, `where_not_obsolete` (also a filter),
/// `status_code_phrase`. Filter: `link_remarks`.
pub struct TemplateGlobals {
    service: Arc<ServiceInfo>,
    http: Option<Arc<HttpServiceInfo>>,
    code_gen_comment: String,
}

impl TemplateGlobals {
    pub fn new(generator_name: &str, service: ServiceInfo, http: Option<HttpServiceInfo>) -> Self {
        Self {
            service: Arc::new(service),
            http: http.map(Arc::new),
            code_gen_comment: code_gen_comment(generator_name),
        }
    }

    /// Render context holding the global variables.
    #[must_use]
    pub fn context(&self) -> Value {
        minijinja::context! {
            Service => Value::from_serialize(&*self.service),
            HttpService => self.http.as_deref().map(Value::from_serialize),
            CodeGenCommentText => self.code_gen_comment.clone(),
        }
    }

    /// Register the capability functions on `env`.
    pub fn install(&self, env: &mut Environment<'_>) {
        let http = self.http.clone();
        env.add_function("get_http", move |method: Value| -> Result<Value, Error> {
            let Some(http) = http.as_ref() else {
                return Ok(Value::from(()));
            };
            let name = string_attr(&method, "name", "get_http")?;
            Ok(http
                .find_method(&name)
                .map(Value::from_serialize)
                .unwrap_or_else(|| Value::from(())))
        });

        let service = Arc::clone(&self.service);
        env.add_function("get_field_type", move |field: Value| -> Result<Value, Error> {
            let type_name = string_attr(&field, "type", "get_field_type")?;
            let kind = service
                .resolve_type(&type_name)
                .map_err(|e| {
                    Error::new(ErrorKind::InvalidOperation, format!("get_field_type: {e}"))
                        .with_source(e)
                })?
                .kind();
            Ok(Value::from_object(FieldType {
                service: Arc::clone(&service),
                type_name,
                kind,
            }))
        });

        env.add_function("render_field_type", |ty: Value| -> Result<String, Error> {
            let ft = field_type_arg(&ty, "render_field_type")?;
            ft.render_with(render_field_type)
        });
        env.add_function(
            "render_field_type_as_json_value",
            |ty: Value| -> Result<String, Error> {
                let ft = field_type_arg(&ty, "render_field_type_as_json_value")?;
                ft.render_with(render_field_type_as_json_value)
            },
        );

        env.add_function("where_not_obsolete", where_not_obsolete);
        env.add_filter("where_not_obsolete", where_not_obsolete);

        env.add_function("status_code_phrase", |code: i64| -> String {
            u16::try_from(code)
                .ok()
                .and_then(status_code_phrase)
                .unwrap_or_default()
                .to_string()
        });

        env.add_filter(
            "link_remarks",
            |text: String, prefix: Option<String>| -> String {
                let prefix = prefix.unwrap_or_default();
                EMPTY_LINK_RE
                    .replace_all(&text, |caps: &regex::Captures<'_>| {
                        format!("[{0}]({1}{0}.md)", &caps[1], prefix)
                    })
                    .into_owned()
            },
        );
    }
}

/// Opaque handle returned by `get_field_type`; exposes `kind` and `name`
/// and renders as the type name.
#[derive(Debug)]
struct FieldType {
    service: Arc<ServiceInfo>,
    type_name: String,
    kind: ServiceTypeKind,
}

impl FieldType {
    fn render_with(
        &self,
        render: fn(&crate::model::ServiceType<'_>) -> String,
    ) -> Result<String, Error> {
        let ty = self.service.resolve_type(&self.type_name).map_err(|e| {
            Error::new(ErrorKind::InvalidOperation, e.to_string()).with_source(e)
        })?;
        Ok(render(&ty))
    }
}

impl Object for FieldType {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "kind" => Some(Value::from(self.kind.as_str())),
            "name" => Some(Value::from(self.type_name.as_str())),
            _ => None,
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

fn field_type_arg<'v>(value: &'v Value, func: &str) -> Result<&'v FieldType, Error> {
    value.downcast_object_ref::<FieldType>().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("{func}: expected the result of get_field_type, got {value}"),
        )
    })
}

fn string_attr(value: &Value, name: &str, func: &str) -> Result<String, Error> {
    value
        .get_attr(name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("{func}: argument has no string attribute '{name}'"),
            )
        })
}

fn where_not_obsolete(items: Value) -> Result<Value, Error> {
    let mut visible = Vec::new();
    for item in items.try_iter()? {
        if !is_obsolete(&item)? {
            visible.push(item);
        }
    }
    Ok(Value::from(visible))
}

/// Service elements carry `obsolete` directly; HTTP methods and fields
/// defer to the service method or field they bind.
fn is_obsolete(item: &Value) -> Result<bool, Error> {
    if let Some(flag) = defined_attr(item, "obsolete") {
        return Ok(flag.is_true());
    }
    for owner in ["service_method", "service_field"] {
        if let Some(flag) = defined_attr(item, owner).and_then(|o| defined_attr(&o, "obsolete")) {
            return Ok(flag.is_true());
        }
    }
    Err(Error::new(
        ErrorKind::InvalidOperation,
        format!("where_not_obsolete: unsupported item {item}"),
    ))
}

fn defined_attr(value: &Value, name: &str) -> Option<Value> {
    value.get_attr(name).ok().filter(|v| !v.is_undefined())
}
