use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use super::globals::TemplateGlobals;
use super::split::{split_output, OutputFile, SplitSettings};
use super::GenerateError;

const TEMPLATE_NAME: &str = "markdown";

/// A compiled multi-file template.
///
/// The template renders to a single text blob which is then split into
/// files on `==>` delimiter lines (see [`split_output`]).
#[derive(Debug, Clone)]
pub struct CodeGenTemplate {
    source: String,
}

impl CodeGenTemplate {
    /// Compile `text`, reporting syntax errors up front.
    pub fn parse(text: impl Into<String>) -> Result<Self, GenerateError> {
        let source = text.into();
        {
            let env = environment();
            env.template_from_str(&source)?;
        }
        Ok(Self { source })
    }

    /// Render the template against `globals` and split the result.
    pub fn generate(
        &self,
        globals: &TemplateGlobals,
        settings: &SplitSettings,
    ) -> Result<Vec<OutputFile>, GenerateError> {
        let mut env = environment();
        globals.install(&mut env);
        env.add_template(TEMPLATE_NAME, &self.source)?;
        let text = env.get_template(TEMPLATE_NAME)?.render(globals.context())?;

        let files = split_output(&text, settings);
        if files.is_empty() {
            tracing::warn!("template output has no file delimiter line; no files generated");
        }
        Ok(files)
    }
}

fn environment<'s>() -> Environment<'s> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::ServiceInfo;

    fn globals() -> TemplateGlobals {
        TemplateGlobals::new(
            "test",
            ServiceInfo {
                name: "Api".into(),
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn test_parse_rejects_bad_syntax() {
        assert!(matches!(
            CodeGenTemplate::parse("{% if %}"),
            Err(GenerateError::Template(_))
        ));
    }

    #[test]
    fn test_generate_splits_rendered_text() {
        let template = CodeGenTemplate::parse(
            "==> {{ Service.name }}.md\n\n# {{ Service.name }}\n\n==> {{ Service.name }}/other.md\nx\n",
        )
        .unwrap();
        let files = template.generate(&globals(), &SplitSettings::default()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), "Api.md");
        assert_eq!(files[0].text(), "# Api\n");
        assert_eq!(files[1].name(), "Api/other.md");
    }

    #[test]
    fn test_strict_undefined() {
        let template = CodeGenTemplate::parse("==> a\n{{ Missing }}\n").unwrap();
        assert!(template.generate(&globals(), &SplitSettings::default()).is_err());
    }

    #[test]
    fn test_no_delimiter_is_empty_not_error() {
        let template = CodeGenTemplate::parse("nothing here\n").unwrap();
        assert!(template
            .generate(&globals(), &SplitSettings::default())
            .unwrap()
            .is_empty());
    }
}
