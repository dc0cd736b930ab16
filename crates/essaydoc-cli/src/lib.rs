//! essaydoc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for essaydoc:
//! - Parse: print the structure of an essay
//! - Docx / Pptx: render an essay to Word or PowerPoint
//! - Build: render both from one parse
//! - Inspect: list the paragraphs of a generated DOCX
//!
//! # Library Usage
//!
//! ```no_run
//! use std::path::Path;
//! use essaydoc_cli::{build_command, parse_command, OutputFormat};
//!
//! let summary = parse_command(Path::new("essay.txt"), OutputFormat::Text, None)?;
//! let (docx, pptx) = build_command(Path::new("essay.txt"), Some(Path::new("out")), None)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! essaydoc parse essay.txt --format json
//! essaydoc docx essay.txt --output essay.docx
//! essaydoc build essay.txt -d out/ --config essaydoc.toml
//! cat essay.txt | essaydoc pptx -
//! ```

pub mod app;
pub mod config;

// Re-export main entry point and types
pub use app::{
    build_command, default_output, docx_command, inspect_command, parse_command, pptx_command,
    summarize,
};
pub use app::{init_tracing, run_cli, OutputFormat};
pub use config::{EssaydocConfig, CONFIG_FILE_NAME};
