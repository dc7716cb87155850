//! Lint a `contributes.commands` value for extension authors.
//!
//! Usage:
//!   contrib-lint --file extensions/acme.tools/package.json
//!   contrib-lint < commands.json
//!   contrib-lint --schema
//!
//! Reports authoring-schema findings and the rejections the runtime
//! contribution handler would produce for each declaration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use cmdcontrib::config::init_logging;
use cmdcontrib::{
    Decoded, command_contribution_schema, decode, lint_contribution, parse_contribution,
};
use serde_json::Value;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contrib-lint")]
#[command(about = "Check command contributions against the schema and runtime rules")]
struct Cli {
    /// Manifest or contribution file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Print the authoring schema and exit.
    #[arg(long)]
    schema: bool,
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
            .context("reading stdin for contribution JSON")?;
    }
    Ok(buf)
}

fn runtime_rejections(value: &Value) -> Vec<String> {
    let candidates: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(idx, candidate)| match decode(candidate) {
            Decoded::Valid(_) => None,
            Decoded::Rejected(rejects) => {
                Some(format!("declaration {idx}: {}", rejects.join("; ")))
            }
        })
        .collect()
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if cli.schema {
        let rendered = serde_json::to_string_pretty(command_contribution_schema())
            .context("serializing contribution schema")?;
        println!("{rendered}");
        return Ok(());
    }

    let value = parse_contribution(&read_input(cli.file)?)?;
    let findings = lint_contribution(&value)?;
    for finding in &findings {
        println!("schema: {finding}");
    }
    let rejections = runtime_rejections(&value);
    for rejection in &rejections {
        println!("runtime: {rejection}");
    }

    if !findings.is_empty() || !rejections.is_empty() {
        bail!(
            "{} schema finding(s), {} rejected declaration(s)",
            findings.len(),
            rejections.len()
        );
    }
    Ok(())
}
