use super::globals::{code_gen_comment, TemplateGlobals};
use super::split::{OutputFile, SplitSettings};
use super::template::CodeGenTemplate;
use super::GenerateError;
use crate::config::GeneratorSettings;
use crate::model::ServiceDocument;

/// Template used when no custom template is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/markdown.md.jinja");

/// Files that may be deleted if a previous run generated them and this run
/// did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPattern {
    /// Glob relative to the output directory, e.g. `WidgetApi/*.md`.
    pub pattern: String,
    /// Only files containing this text are considered generated.
    pub required_text: String,
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenOutput {
    pub files: Vec<OutputFile>,
    pub patterns_to_clean: Vec<CleanPattern>,
}

/// Generates the Markdown documentation of a service.
#[derive(Debug, Clone, Default)]
pub struct MarkdownGenerator {
    pub settings: GeneratorSettings,
}

impl MarkdownGenerator {
    #[must_use]
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Render every document of `doc`.
    ///
    /// Without HTTP information (`no_http`, or no binding in the document)
    /// method and DTO pages are produced from the plain field lists.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP binding does not resolve against the service, the
    /// template does not compile, or rendering fails (including field types
    /// that do not resolve).
    pub fn generate_output(&self, doc: &ServiceDocument) -> Result<CodeGenOutput, GenerateError> {
        let settings = &self.settings;
        let http = if settings.no_http {
            None
        } else {
            doc.http_service()?
        };
        let has_http = http.is_some();

        let template = CodeGenTemplate::parse(
            settings
                .template_text
                .as_deref()
                .unwrap_or(DEFAULT_TEMPLATE),
        )?;
        let globals = TemplateGlobals::new(&settings.generator_name, doc.service.clone(), http);
        let files = template.generate(
            &globals,
            &SplitSettings {
                newline: settings.newline.as_str().to_string(),
                indent_text: settings.indent_text.clone(),
            },
        )?;

        tracing::info!(
            service = %doc.service.name,
            files = files.len(),
            http = has_http,
            custom_template = settings.template_text.is_some(),
            "generated markdown"
        );

        Ok(CodeGenOutput {
            files,
            patterns_to_clean: vec![CleanPattern {
                pattern: format!("{}/*.md", doc.service.name),
                required_text: code_gen_comment(&settings.generator_name),
            }],
        })
    }
}
