//! Build the command catalog from installed extensions.
//!
//! Usage:
//!   command-catalog --extensions-dir ./extensions
//!   command-catalog --format palette --deny-rejects
//!
//! Every extension's `contributes.commands` is validated and normalized, the
//! catalog is sealed, and the result is printed to stdout. Rejections are
//! reported per extension on stderr.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use cmdcontrib::config::{find_extensions_dir, init_logging};
use cmdcontrib::manifest::discover_extensions;
use cmdcontrib::{CommandCatalog, CommandIndex, Where, handle_extensions};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Palette,
}

#[derive(Parser, Debug)]
#[command(name = "command-catalog")]
#[command(about = "Validate extension command contributions and print the sealed catalog")]
struct Cli {
    /// Directory containing one folder per installed extension.
    #[arg(long)]
    extensions_dir: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
    /// Exit non-zero when any declaration was rejected.
    #[arg(long)]
    deny_rejects: bool,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = find_extensions_dir(cli.extensions_dir.as_deref())?;
    let extensions = discover_extensions(&root)?;

    let mut users: Vec<_> = extensions
        .iter()
        .filter_map(|extension| extension.commands_point_user())
        .collect();
    let mut catalog = CommandCatalog::new();
    let sealed = handle_extensions(&mut catalog, users.iter_mut())
        .context("building command catalog")?;

    let mut rejected = 0usize;
    for user in &users {
        for message in user.collector.errors() {
            rejected += 1;
            eprintln!("{}: {}", message.extension_id, message.text);
        }
    }

    match cli.format {
        Format::Json => {
            let rendered = serde_json::to_string_pretty(sealed.commands())
                .context("serializing command catalog")?;
            println!("{rendered}");
        }
        Format::Palette => {
            let index = CommandIndex::new(sealed);
            for command in index.palette() {
                println!("{}\t{}", command.command, command.label());
            }
            for site in Where::ALL {
                let ids: Vec<&str> = index.menu(site).map(|c| c.command.as_str()).collect();
                if !ids.is_empty() {
                    println!("[{site}] {}", ids.join(", "));
                }
            }
        }
    }

    if cli.deny_rejects && rejected > 0 {
        bail!("{rejected} command declaration(s) rejected; see stderr for details");
    }
    Ok(())
}
