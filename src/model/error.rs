use thiserror::Error;

/// Errors raised while loading or resolving a service model.
///
/// All of these indicate a defect in the model handed to the generator; none
/// of them is recoverable by retrying.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field type '{type_name}'")]
    UnknownType { type_name: String },

    #[error("HTTP binding references unknown method '{method}'")]
    UnknownMethod { method: String },

    #[error("HTTP binding of '{method}' references unknown {side} field '{field}'")]
    UnknownField {
        method: String,
        side: &'static str,
        field: String,
    },

    #[error("HTTP binding of '{method}' has invalid verb '{verb}'")]
    InvalidVerb { method: String, verb: String },

    #[error("HTTP binding of '{method}' has invalid status code {status}")]
    InvalidStatus { method: String, status: u16 },

    #[error("failed to parse service document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse service document as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
