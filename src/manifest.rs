//! Extension manifest discovery for the binaries.
//!
//! Each installed extension lives in its own directory under the extensions
//! root and carries a `package.json`. Only the fields the `commands`
//! contribution point needs are read.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::contribution::{ExtensionDescription, ExtensionMessages, ExtensionPointUser};

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize, Clone)]
pub struct ExtensionManifest {
    pub name: String,
    pub publisher: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub contributes: Contributes,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Contributes {
    #[serde(default)]
    pub commands: Option<Value>,
}

impl ExtensionManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading extension manifest {}", path.display()))?;
        let manifest: ExtensionManifest = serde_json::from_str(&data)
            .with_context(|| format!("parsing extension manifest {}", path.display()))?;
        if manifest.name.trim().is_empty() || manifest.publisher.trim().is_empty() {
            bail!(
                "extension manifest {} must declare a non-empty name and publisher",
                path.display()
            );
        }
        Ok(manifest)
    }

    pub fn id(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}

/// An extension found on disk.
#[derive(Debug, Clone)]
pub struct InstalledExtension {
    pub folder: PathBuf,
    pub manifest: ExtensionManifest,
}

impl InstalledExtension {
    pub fn description(&self) -> ExtensionDescription {
        ExtensionDescription {
            id: self.manifest.id(),
            extension_folder_path: self.folder.clone(),
        }
    }

    /// The `commands` contribution, if the manifest declares one.
    pub fn commands_point_user(&self) -> Option<ExtensionPointUser<ExtensionMessages>> {
        let value = self.manifest.contributes.commands.clone()?;
        let description = self.description();
        Some(ExtensionPointUser {
            collector: ExtensionMessages::new(description.id.clone()),
            description,
            value,
        })
    }
}

/// List extensions under `root`, ordered by directory name.
///
/// Directories without a manifest are skipped.
pub fn discover_extensions(root: &Path) -> Result<Vec<InstalledExtension>> {
    let root = fs::canonicalize(root)
        .with_context(|| format!("resolving extensions directory {}", root.display()))?;
    let mut folders = Vec::new();
    for entry in fs::read_dir(&root)
        .with_context(|| format!("reading extensions directory {}", root.display()))?
    {
        let entry = entry.with_context(|| format!("listing {}", root.display()))?;
        let path = entry.path();
        if path.is_dir() && path.join(MANIFEST_FILE).is_file() {
            folders.push(path);
        }
    }
    folders.sort();

    let mut extensions = Vec::with_capacity(folders.len());
    for folder in folders {
        let manifest = ExtensionManifest::load(&folder.join(MANIFEST_FILE))?;
        tracing::debug!(extension = %manifest.id(), folder = %folder.display(), "discovered extension");
        extensions.push(InstalledExtension { folder, manifest });
    }
    Ok(extensions)
}
