//! Validate a resolved layout document without encoding it.
//!
//! Usage:
//!   layout-validate --file layout.json
//!   layout-validate < layout.json

use anyhow::{Context, Result};
use clap::Parser;
use kllemit::{LayoutSchema, ResolvedLayout, logging};
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "layout-validate")]
#[command(about = "Validate a resolved KLL layout against its JSON Schema")]
struct Cli {
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Optional schema path; defaults to the bundled schema.
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(&path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for input JSON")?;
    }
    Ok(buf)
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let schema = LayoutSchema::resolve(cli.schema.as_deref())?;
    let input = read_input(cli.file)?;
    let layout = ResolvedLayout::from_str_with(&input, &schema)?;
    println!(
        "ok: {} capabilities, {} result macros, {} trigger macros, {} layers",
        layout.capabilities.len(),
        layout.results.len(),
        layout.triggers.len(),
        layout.layers.len()
    );
    Ok(())
}
