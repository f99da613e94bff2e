use crate::config::{
    build_settings, find_settings_file, load_settings_file, NewlineMode, SettingsOverrides,
};
use crate::generator::MarkdownGenerator;
use crate::model::load_service;
use crate::output::{write_output, WriteOptions};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line interface for the service documentation generator
#[derive(Parser)]
#[command(name = "servicedoc-gen", version)]
#[command(about = "Generate Markdown documentation from a service description", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether logging should be limited to warnings and errors.
    #[must_use]
    pub fn quiet(&self) -> bool {
        matches!(self.command, Commands::Generate { quiet: true, .. })
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate Markdown documents from a service document
    Generate {
        /// Path to the service document (YAML or JSON)
        input: PathBuf,

        /// Directory the documents are written to
        output: PathBuf,

        /// Document without the HTTP binding
        #[arg(long, default_value_t = false)]
        no_http: bool,

        /// Template to use instead of the built-in one
        #[arg(long)]
        template: Option<PathBuf>,

        /// Newline written after every line
        #[arg(long, value_enum)]
        newline: Option<NewlineMode>,

        /// Indentation of the output: 'tab' or a number of spaces (1-8)
        #[arg(long)]
        indent: Option<String>,

        /// Settings file (servicedoc.toml)
        /// If not provided, will auto-detect alongside the service document
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Fail if any file would change
        #[arg(long, default_value_t = false)]
        verify: bool,

        /// Remove generated files that are no longer produced
        #[arg(long, default_value_t = false)]
        clean: bool,

        /// Only log warnings and errors
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },
    /// Resolve every type and HTTP reference of a service document
    Check {
        /// Path to the service document (YAML or JSON)
        input: PathBuf,
    },
}

/// Execute a CLI command
///
/// # Errors
///
/// Returns an error when the service document cannot be loaded, does not
/// resolve, generation fails, or the output cannot be written (or is out of
/// date under `--verify`).
pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            input,
            output,
            no_http,
            template,
            newline,
            indent,
            config,
            dry_run,
            verify,
            clean,
            quiet: _,
        } => {
            let overrides = SettingsOverrides {
                newline: *newline,
                indent: indent.clone(),
                no_http: *no_http,
                template: template.clone(),
            };
            let options = WriteOptions {
                dry_run: *dry_run,
                verify: *verify,
                clean: *clean,
            };
            generate(input, output, config.as_deref(), &overrides, &options)
        }
        Commands::Check { input } => check(input),
    }
}

fn generate(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
    options: &WriteOptions,
) -> anyhow::Result<()> {
    let doc = load_service(input)?;

    let settings_path = match config {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Settings file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_settings_file(input),
    };
    let file = match &settings_path {
        Some(path) => load_settings_file(path)?,
        None => None,
    };
    let settings = build_settings(
        file,
        settings_path.as_deref().and_then(Path::parent),
        overrides,
    )?;

    let generated = MarkdownGenerator::new(settings).generate_output(&doc)?;
    let summary = write_output(&generated, output, options)?;

    tracing::info!(
        output = %output.display(),
        files = generated.files.len(),
        updated = summary.updated.len(),
        removed = summary.removed.len(),
        dry_run = options.dry_run,
        "done"
    );
    Ok(())
}

fn check(input: &Path) -> anyhow::Result<()> {
    let doc = load_service(input)?;
    let errors = doc.check();
    if errors.is_empty() {
        tracing::info!(service = %doc.service.name, "service document is valid");
        return Ok(());
    }
    for error in &errors {
        tracing::error!(%error, "invalid service document");
    }
    anyhow::bail!(
        "{} has {} error(s); first: {}",
        input.display(),
        errors.len(),
        errors[0]
    )
}
