//! # Generator Configuration
//!
//! Settings controlling how documents are generated, merged from three
//! sources in increasing priority:
//!
//! 1. built-in defaults ([`GeneratorSettings::default`])
//! 2. a `servicedoc.toml` settings file, auto-detected next to the service
//!    document or passed explicitly
//! 3. command-line flags
//!
//! ## Settings file
//!
//! ```toml
//! newline = "lf"          # auto | lf | crlf
//! indent = "tab"          # tab | 1..8 (spaces)
//! no_http = false
//! template = "docs.md.jinja"   # relative to this file
//! generator_name = "servicedoc-gen"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the service document.
pub const SETTINGS_FILE_NAME: &str = "servicedoc.toml";

/// Name written into the generated-file marker comment by default.
pub const DEFAULT_GENERATOR_NAME: &str = "servicedoc-gen";

/// Newline sequence written after every generated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NewlineMode {
    /// Platform newline
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl NewlineMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineMode::Auto => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            NewlineMode::Lf => "\n",
            NewlineMode::Crlf => "\r\n",
        }
    }
}

/// Parse an indent option: `tab`, or a number of spaces from 1 to 8.
///
/// # Errors
///
/// Returns an error for anything else.
pub fn parse_indent(value: &str) -> anyhow::Result<String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    match value.parse::<usize>() {
        Ok(n @ 1..=8) => Ok(" ".repeat(n)),
        _ => anyhow::bail!("invalid indent '{value}': expected 'tab' or 1-8"),
    }
}

/// Everything the Markdown generator needs besides the service itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub generator_name: String,
    /// Document without the HTTP binding even if the service has one.
    pub no_http: bool,
    /// Replaces the built-in template when set.
    pub template_text: Option<String>,
    pub newline: NewlineMode,
    /// Indentation unit of the output; `None` keeps the template's.
    pub indent_text: Option<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            generator_name: DEFAULT_GENERATOR_NAME.to_string(),
            no_http: false,
            template_text: None,
            newline: NewlineMode::Auto,
            indent_text: None,
        }
    }
}

/// Contents of a `servicedoc.toml` settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub newline: Option<NewlineMode>,
    pub indent: Option<String>,
    pub no_http: Option<bool>,
    pub template: Option<PathBuf>,
    pub generator_name: Option<String>,
}

/// Values given on the command line; `None`/`false` defer to the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub newline: Option<NewlineMode>,
    pub indent: Option<String>,
    pub no_http: bool,
    pub template: Option<PathBuf>,
}

/// The settings file next to `input`, if there is one.
#[must_use]
pub fn find_settings_file(input: &Path) -> Option<PathBuf> {
    let candidate = input.parent()?.join(SETTINGS_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load a settings file.
///
/// Returns `Ok(None)` if the file does not exist and an error if it exists
/// but cannot be read or parsed.
pub fn load_settings_file(path: &Path) -> anyhow::Result<Option<SettingsFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings: SettingsFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings file");
    Ok(Some(settings))
}

/// Merge defaults, an optional settings file and command-line overrides.
///
/// `file_dir` is the directory of the settings file; a relative `template`
/// path in the file is resolved against it. Template paths given as
/// overrides are used as-is.
pub fn build_settings(
    file: Option<SettingsFile>,
    file_dir: Option<&Path>,
    overrides: &SettingsOverrides,
) -> anyhow::Result<GeneratorSettings> {
    let file = file.unwrap_or_default();
    let mut settings = GeneratorSettings::default();

    if let Some(name) = file.generator_name {
        settings.generator_name = name;
    }
    settings.no_http = overrides.no_http || file.no_http.unwrap_or(false);
    settings.newline = overrides.newline.or(file.newline).unwrap_or_default();

    if let Some(indent) = overrides.indent.as_deref().or(file.indent.as_deref()) {
        settings.indent_text = Some(parse_indent(indent)?);
    }

    let template_path = match (&overrides.template, file.template) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(path)) => Some(match file_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }),
        (None, None) => None,
    };
    if let Some(path) = template_path {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
        settings.template_text = Some(text);
    }

    Ok(settings)
}
