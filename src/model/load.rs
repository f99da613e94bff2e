use super::error::ModelError;
use super::types::{HttpServiceInfo, ServiceInfo};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parsed service definition plus its optional, precomputed HTTP binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDocument {
    pub service: ServiceInfo,
    #[serde(default)]
    pub http: Option<HttpBinding>,
}

/// HTTP binding as it appears in a service document: methods and fields are
/// referenced by name and linked by [`HttpServiceInfo::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpBinding {
    pub url: Option<String>,
    pub methods: Vec<HttpMethodBinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpMethodBinding {
    /// Name of the service method this binding belongs to.
    pub method: String,
    pub verb: String,
    pub path: String,
    pub path_fields: Vec<HttpFieldRef>,
    pub query_fields: Vec<HttpFieldRef>,
    pub request_header_fields: Vec<HttpFieldRef>,
    pub request_body_field: Option<HttpFieldRef>,
    pub request_normal_fields: Vec<HttpFieldRef>,
    pub response_header_fields: Vec<HttpFieldRef>,
    pub responses: Vec<HttpResponseBinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpResponseBinding {
    pub status: u16,
    pub body_field: Option<HttpFieldRef>,
    pub normal_fields: Vec<HttpFieldRef>,
}

/// Either a bare field name, or a wire name mapped onto a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HttpFieldRef {
    Field(String),
    Named { name: String, field: String },
}

impl HttpFieldRef {
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            HttpFieldRef::Field(field) | HttpFieldRef::Named { field, .. } => field,
        }
    }

    #[must_use]
    pub fn wire_name(&self) -> &str {
        match self {
            HttpFieldRef::Field(field) => field,
            HttpFieldRef::Named { name, .. } => name,
        }
    }
}

/// Source format of a service document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// YAML for `.yaml`/`.yml`, JSON for anything else.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

impl ServiceDocument {
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, ModelError> {
        Ok(match format {
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
            DocumentFormat::Json => serde_json::from_str(text)?,
        })
    }

    /// The resolved HTTP binding, or `None` when the document carries none.
    pub fn http_service(&self) -> Result<Option<HttpServiceInfo>, ModelError> {
        self.http
            .as_ref()
            .map(|binding| HttpServiceInfo::resolve(&self.service, binding))
            .transpose()
    }

    /// Resolve every field type of every element, collecting all failures.
    ///
    /// Obsolete elements are checked too; a template is free to render them.
    #[must_use]
    pub fn check(&self) -> Vec<ModelError> {
        let svc = &self.service;
        let fields = svc
            .methods
            .iter()
            .flat_map(|m| m.request_fields.iter().chain(m.response_fields.iter()))
            .chain(svc.dtos.iter().flat_map(|d| d.fields.iter()));

        let mut errors: Vec<ModelError> = fields
            .filter_map(|f| svc.get_field_type(f).err())
            .collect();
        if let Err(e) = self.http_service() {
            errors.push(e);
        }
        errors
    }
}

/// Load a service document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as a
/// service document.
pub fn load_service(path: &Path) -> anyhow::Result<ServiceDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read service document: {}", path.display()))?;
    let doc = ServiceDocument::parse(&content, DocumentFormat::from_path(path))
        .with_context(|| format!("Failed to parse service document: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        service = %doc.service.name,
        methods = doc.service.methods.len(),
        dtos = doc.service.dtos.len(),
        enums = doc.service.enums.len(),
        error_sets = doc.service.error_sets.len(),
        has_http = doc.http.is_some(),
        "loaded service document"
    );
    Ok(doc)
}
