//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use essaydoc_ast::Document;
use essaydoc_core::parse_with_config;
use essaydoc_ooxml::{read_archive_paragraphs, DocxWriter, OoxmlArchive};
use essaydoc_pptx::{PptxWriter, SlideExtractor};

use crate::config::EssaydocConfig;

/// Input path meaning "read standard input"
pub const STDIN_PATH: &str = "-";

/// File stem used for outputs when reading standard input
const STDIN_STEM: &str = "essay";

/// Output format for `parse` and `inspect`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "essaydoc")]
#[command(author, version, about = "Essay text to DOCX and PPTX", long_about = None)]
struct Cli {
    /// Configuration file (defaults to essaydoc.toml next to the input)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an essay and print its structure
    Parse {
        /// Input essay text file ("-" for stdin)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render an essay to a Word document
    Docx {
        /// Input essay text file ("-" for stdin)
        input: PathBuf,

        /// Output DOCX file (defaults to <input>.docx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an essay to a slide deck
    Pptx {
        /// Input essay text file ("-" for stdin)
        input: PathBuf,

        /// Output PPTX file (defaults to <input>.pptx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render both the Word document and the slide deck
    Build {
        /// Input essay text file ("-" for stdin)
        input: PathBuf,

        /// Output directory (defaults to the input's directory)
        #[arg(short = 'd', long)]
        out_dir: Option<PathBuf>,
    },

    /// List the paragraphs of a generated DOCX file
    Inspect {
        /// Input DOCX file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Install the stderr log subscriber
pub fn init_tracing(verbose: bool) {
    let directives = log_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .init();
}

/// `-v` forces debug; otherwise `RUST_LOG` when set, else info
fn log_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Parse { input, format } => {
            let output = parse_command(&input, format, config)?;
            print!("{}", output);
        }
        Commands::Docx { input, output } => {
            let path = docx_command(&input, output.as_deref(), config)?;
            println!("Created: {}", path.display());
        }
        Commands::Pptx { input, output } => {
            let path = pptx_command(&input, output.as_deref(), config)?;
            println!("Created: {}", path.display());
        }
        Commands::Build { input, out_dir } => {
            let (docx, pptx) = build_command(&input, out_dir.as_deref(), config)?;
            println!("Created: {}", docx.display());
            println!("Created: {}", pptx.display());
        }
        Commands::Inspect { input, format } => {
            let output = inspect_command(&input, format)?;
            print!("{}", output);
        }
    }

    Ok(())
}

/// Parse an essay and render its structure as text or JSON
pub fn parse_command(input: &Path, format: OutputFormat, config: Option<&Path>) -> Result<String> {
    let (doc, _) = load_document(input, config)?;

    match format {
        OutputFormat::Text => Ok(summarize(&doc)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&doc).context("Failed to serialize document")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render an essay to DOCX, returning the path written
pub fn docx_command(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<PathBuf> {
    let (doc, config) = load_document(input, config)?;
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, "docx", None));

    write_docx(&doc, &config, &output_path)?;
    Ok(output_path)
}

/// Render an essay to PPTX, returning the path written
pub fn pptx_command(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<PathBuf> {
    let (doc, config) = load_document(input, config)?;
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, "pptx", None));

    write_pptx(&doc, &config, &output_path)?;
    Ok(output_path)
}

/// Render both formats from a single parse, returning `(docx, pptx)` paths
pub fn build_command(
    input: &Path,
    out_dir: Option<&Path>,
    config: Option<&Path>,
) -> Result<(PathBuf, PathBuf)> {
    let (doc, config) = load_document(input, config)?;

    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let docx_path = default_output(input, "docx", out_dir);
    let pptx_path = default_output(input, "pptx", out_dir);

    write_docx(&doc, &config, &docx_path)?;
    write_pptx(&doc, &config, &pptx_path)?;

    Ok((docx_path, pptx_path))
}

/// Read a DOCX back and list its paragraphs with their styles
pub fn inspect_command(input: &Path, format: OutputFormat) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let archive = OoxmlArchive::open(input)
        .with_context(|| format!("Failed to open DOCX file: {}", input.display()))?;
    let paragraphs = read_archive_paragraphs(&archive)
        .with_context(|| format!("Failed to read paragraphs: {}", input.display()))?;

    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&paragraphs)
                .context("Failed to serialize paragraphs")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for para in &paragraphs {
                if para.page_break {
                    out.push_str("--- page break ---\n");
                }
                if para.text.is_empty() {
                    continue;
                }
                let style = para.style_id.as_deref().unwrap_or("-");
                let _ = writeln!(out, "[{}] {}", style, para.text.replace('\n', " / "));
            }
            Ok(out)
        }
    }
}

/// Human-readable structure summary
pub fn summarize(doc: &Document) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Title: {}", doc.title);
    let _ = writeln!(out, "Metadata:");
    for line in &doc.metadata_lines {
        let _ = writeln!(out, "  {}", line);
    }
    if !doc.preamble.is_empty() {
        let _ = writeln!(out, "Preamble: {} paragraph(s)", doc.preamble.len());
    }
    let _ = writeln!(out, "Sections: {}", doc.heading_count());
    for section in &doc.sections {
        let _ = writeln!(
            out,
            "  {} ({} paragraph(s))",
            section.heading,
            section.paragraphs.len()
        );
    }

    out
}

/// Output path for `input` with a new extension.
///
/// Without `dir` the file lands beside the input (or in the current
/// directory for stdin).
pub fn default_output(input: &Path, extension: &str, dir: Option<&Path>) -> PathBuf {
    let stem = if is_stdin(input) {
        STDIN_STEM.to_string()
    } else {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| STDIN_STEM.to_string())
    };
    let file_name = format!("{}.{}", stem, extension);

    match dir {
        Some(dir) => dir.join(file_name),
        None if is_stdin(input) => PathBuf::from(file_name),
        None => input.with_file_name(file_name),
    }
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == STDIN_PATH
}

fn read_input(input: &Path) -> Result<String> {
    if is_stdin(input) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
}

fn load_document(input: &Path, config: Option<&Path>) -> Result<(Document, EssaydocConfig)> {
    let config = EssaydocConfig::resolve(config, input)?;
    let text = read_input(input)?;

    info!("Parsing {}", input.display());
    let doc = parse_with_config(&text, &config.parser)
        .with_context(|| format!("Failed to parse essay: {}", input.display()))?;
    info!(
        "Parsed '{}': {} section(s), {} paragraph(s)",
        doc.title,
        doc.heading_count(),
        doc.paragraph_count()
    );

    Ok((doc, config))
}

fn write_docx(doc: &Document, config: &EssaydocConfig, path: &Path) -> Result<()> {
    info!("Writing DOCX: {}", path.display());
    DocxWriter::new(config.docx.clone())
        .write_to_file(doc, path)
        .with_context(|| format!("Failed to write DOCX file: {}", path.display()))
}

fn write_pptx(doc: &Document, config: &EssaydocConfig, path: &Path) -> Result<()> {
    let deck = SlideExtractor::extract_with_contract(doc, &config.pptx);
    info!("Writing PPTX: {} ({} slides)", path.display(), deck.len());

    PptxWriter::new(config.pptx.clone())
        .with_deck(deck)
        .write_to_file(path)
        .with_context(|| format!("Failed to write PPTX file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(log_directives(false, None), "info");
        assert_eq!(log_directives(false, Some("warn".to_string())), "warn");
        assert_eq!(
            log_directives(false, Some("essaydoc_core=trace".to_string())),
            "essaydoc_core=trace"
        );
        assert_eq!(log_directives(false, Some("  ".to_string())), "info");
        assert_eq!(log_directives(true, Some("warn".to_string())), "debug");
    }

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::try_parse_from([
            "essaydoc", "build", "essay.txt", "-d", "out", "--config", "x.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        match cli.command {
            Commands::Build { input, out_dir } => {
                assert_eq!(input, PathBuf::from("essay.txt"));
                assert_eq!(out_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_format_flag() {
        let cli = Cli::try_parse_from(["essaydoc", "parse", "-", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Parse { input, format } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected parse"),
        }
    }

    #[test]
    fn test_default_output_names() {
        assert_eq!(
            default_output(Path::new("dir/my essay.txt"), "docx", None),
            PathBuf::from("dir/my essay.docx")
        );
        assert_eq!(
            default_output(Path::new("dir/essay.txt"), "pptx", Some(Path::new("out"))),
            PathBuf::from("out/essay.pptx")
        );
        assert_eq!(
            default_output(Path::new("-"), "docx", None),
            PathBuf::from("essay.docx")
        );
    }

    #[test]
    fn test_summarize() {
        let mut doc = Document::with_title("Short Stature");
        doc.metadata_lines = vec!["Student: Jane Roe".to_string()];
        doc.push(essaydoc_ast::Section::new("1. Introduction").with_paragraph("Text."));

        let summary = summarize(&doc);
        assert_eq!(
            summary,
            "Title: Short Stature\nMetadata:\n  Student: Jane Roe\nSections: 1\n  1. Introduction (1 paragraph(s))\n"
        );
    }
}
