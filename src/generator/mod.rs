//! # Generator Module
//!
//! Turns a [`ServiceDocument`](crate::model::ServiceDocument) into a set of
//! Markdown documents.
//!
//! ## Architecture
//!
//! ```text
//! Service model → Template globals → minijinja render → one text blob → Splitter → files
//! ```
//!
//! 1. **Globals** ([`TemplateGlobals`]) - expose the service, its HTTP binding
//!    and helper functions to the template
//! 2. **Rendering** ([`CodeGenTemplate`]) - a single template renders every
//!    document into one blob, separated by `==>` delimiter lines
//! 3. **Splitting** ([`split_output`]) - the blob is cut into named files,
//!    blank lines trimmed and indentation re-expressed in the configured unit
//!
//! Type signatures and JSON examples used in the documents come from
//! [`render_field_type`] and [`render_field_type_as_json_value`].
//!
//! ## Generated Structure
//!
//! ```text
//! out/
//! ├── WidgetApi.md           # service overview
//! └── WidgetApi/
//!     ├── getWidget.md       # one per method
//!     ├── Widget.md          # one per DTO
//!     ├── Color.md           # one per enum
//!     └── WidgetErrors.md    # one per error set
//! ```
//!
//! ## Template Customization
//!
//! The built-in template lives in `templates/markdown.md.jinja`. A replacement
//! can be passed with `--template`; it must emit `==> <file name>` lines to
//! start each file.

mod globals;
mod markdown;
mod render;
mod split;
mod status;
mod template;

pub use globals::{code_gen_comment, TemplateGlobals};
pub use markdown::{CleanPattern, CodeGenOutput, MarkdownGenerator, DEFAULT_TEMPLATE};
pub use render::{render_field_type, render_field_type_as_json_value};
pub use split::{split_output, OutputFile, SplitSettings};
pub use status::status_code_phrase;
pub use template::CodeGenTemplate;

use crate::model::ModelError;
use thiserror::Error;

/// Errors raised while generating documents.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}
