//! # CLI Module
//!
//! Command-line interface of the `servicedoc-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Render the Markdown documentation of a service document into a directory:
//!
//! ```bash
//! servicedoc-gen generate widgets.yaml docs/
//! ```
//!
//! Options:
//! - `--no-http` - Document without the HTTP binding
//! - `--template <FILE>` - Use a custom template instead of the built-in one
//! - `--newline <auto|lf|crlf>` - Newline written after every line
//! - `--indent <tab|N>` - Re-express indentation with a tab or N spaces
//! - `--config <FILE>` - Settings file (default: `servicedoc.toml` next to the input)
//! - `--dry-run` - Report what would change without writing
//! - `--verify` - Fail if the output directory is not up to date
//! - `--clean` - Remove stale generated files
//! - `--quiet` - Only log warnings and errors
//!
//! ### `check`
//!
//! Parse a service document and resolve every type and HTTP reference:
//!
//! ```bash
//! servicedoc-gen check widgets.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use servicedoc::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(&cli)?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
