//! # Service Model
//!
//! The typed description of a service that the Markdown generator renders:
//! methods, DTOs, enums, error sets and, optionally, the HTTP binding of each
//! method.
//!
//! Parsing a service definition language is the job of an upstream tool. This
//! module consumes its result as a YAML or JSON [`ServiceDocument`] and
//! resolves the string-typed parts of it:
//!
//! - field type names become [`ServiceType`] values via
//!   [`ServiceInfo::get_field_type`]
//! - the name-based HTTP binding becomes [`HttpServiceInfo`] via
//!   [`HttpServiceInfo::resolve`]

mod build;
mod error;
mod load;
mod types;

pub use error::ModelError;
pub use load::*;
pub use types::*;
