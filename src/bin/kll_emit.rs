//! Encode a resolved KLL layout into kiibohd firmware fill sections.
//!
//! Usage:
//!   kll-emit --input layout.json --output generatedKeymap.json
//!   kll-emit --format text < layout.json
//!
//! Warnings (missing define variables, empty layers) go to stderr; pass
//! `--deny-warnings` to turn them into a failed run. The output file is only
//! replaced once the whole layout has encoded successfully.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use kllemit::{Artifact, LayoutSchema, ResolvedLayout, compile_layout, logging};
use std::fs::File;
use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON object keyed by fill-section name.
    Json,
    /// Plain text, one commented block per section.
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "kll-emit")]
#[command(about = "Encode a resolved KLL layout into kiibohd firmware tables")]
struct Cli {
    /// Resolved layout JSON; reads stdin when omitted.
    #[arg(long, env = "KLL_INPUT")]
    input: Option<PathBuf>,
    /// Destination file; writes stdout when omitted.
    #[arg(long, env = "KLL_OUTPUT")]
    output: Option<PathBuf>,
    /// Artifact format.
    #[arg(long, env = "KLL_FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Alternate JSON Schema for the resolved layout.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Fail when any warning is reported.
    #[arg(long)]
    deny_warnings: bool,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("kll-emit: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let schema = LayoutSchema::resolve(cli.schema.as_deref())?;
    let raw = read_input(cli.input.as_deref())?;
    let layout = ResolvedLayout::from_str_with(&raw, &schema).context("loading resolved layout")?;

    let compilation = compile_layout(&layout).context("encoding layout")?;

    for diagnostic in compilation.diagnostics.iter() {
        eprintln!("kll-emit: warning: {}", diagnostic.message);
    }
    if cli.deny_warnings && !compilation.diagnostics.is_empty() {
        bail!(
            "{} warning(s) reported with --deny-warnings",
            compilation.diagnostics.len()
        );
    }

    let rendered = render(&compilation.artifact, cli.format)?;
    match cli.output {
        Some(path) => write_atomically(&path, &rendered),
        None => {
            stdout()
                .write_all(rendered.as_bytes())
                .context("writing artifact to stdout")
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut buf = String::new();
    if let Some(path) = path {
        File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for resolved layout")?;
    }
    Ok(buf)
}

fn render(artifact: &Artifact, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&artifact.to_json())?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Text => Ok(artifact.render_text()),
    }
}

// Write next to the destination and rename over it, so readers never observe
// a partially written artifact.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .context("writing artifact")?;
    temp.persist(path)
        .with_context(|| format!("persisting artifact to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote artifact");
    Ok(())
}
