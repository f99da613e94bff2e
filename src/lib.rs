//! # servicedoc
//!
//! Renders a typed service description into a set of Markdown documents.
//!
//! ## Overview
//!
//! A service document (YAML or JSON) describes a service: its methods, data
//! transfer objects, enums and error sets, and optionally how the methods map
//! onto HTTP. One template renders the whole documentation as a single text
//! blob in which `==> <file name>` lines start each output file; the blob is
//! then split into files.
//!
//! ## Architecture
//!
//! - **[`model`]** - the service model, type resolution and document loading
//! - **[`generator`]** - template globals, type rendering, the splitter and
//!   the Markdown generator
//! - **[`output`]** - writing generated files, verification and stale-file cleanup
//! - **[`config`]** - generator settings from defaults, `servicedoc.toml` and flags
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `servicedoc-gen` command line
//!
//! ## Example
//!
//! ```rust,ignore
//! use servicedoc::config::GeneratorSettings;
//! use servicedoc::generator::MarkdownGenerator;
//! use servicedoc::model::load_service;
//! use servicedoc::output::{write_output, WriteOptions};
//!
//! let doc = load_service("widgets.yaml".as_ref())?;
//! let output = MarkdownGenerator::new(GeneratorSettings::default()).generate_output(&doc)?;
//! write_output(&output, "docs".as_ref(), &WriteOptions::default())?;
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod logging;
pub mod model;
pub mod output;
