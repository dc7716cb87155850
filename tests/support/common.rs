#![allow(dead_code)]

use anyhow::{Context, Result};
use cmdcontrib::{CommandCatalog, ExtensionDescription, ExtensionMessages};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EXTENSION_ID: &str = "acme.tools";

pub fn extension_root() -> PathBuf {
    PathBuf::from("/ext/foo")
}

pub fn description() -> ExtensionDescription {
    ExtensionDescription {
        id: EXTENSION_ID.to_string(),
        extension_folder_path: extension_root(),
    }
}

pub fn fresh() -> (CommandCatalog, ExtensionMessages) {
    (CommandCatalog::new(), ExtensionMessages::new(EXTENSION_ID))
}

pub fn valid_declaration(id: &str) -> Value {
    json!({
        "command": id,
        "title": format!("Title of {id}"),
        "category": "Acme",
        "icon": "icons/run.svg",
        "context": [{"where": "editor/primary", "when": {"language": "rust"}}]
    })
}

pub fn ids(catalog: &CommandCatalog) -> Vec<String> {
    catalog
        .commands()
        .iter()
        .map(|command| command.command.clone())
        .collect()
}

// Temporary extensions root with one folder per extension manifest.
pub struct ExtensionsTree {
    dir: TempDir,
}

impl ExtensionsTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("allocating extensions root")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn install(&self, folder: &str, manifest: &Value) -> Result<PathBuf> {
        let path = self.dir.path().join(folder);
        fs::create_dir_all(&path)
            .with_context(|| format!("creating extension folder {}", path.display()))?;
        fs::write(path.join("package.json"), serde_json::to_vec_pretty(manifest)?)
            .with_context(|| format!("writing manifest under {}", path.display()))?;
        Ok(path)
    }
}

pub fn manifest(publisher: &str, name: &str, commands: Value) -> Value {
    json!({
        "publisher": publisher,
        "name": name,
        "version": "1.0.0",
        "contributes": {"commands": commands}
    })
}
