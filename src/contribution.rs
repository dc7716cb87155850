//! The `commands` contribution handler.
//!
//! The extension-point framework hands every contributing extension's raw
//! `contributes.commands` value to [`process`], along with a per-extension
//! message collector. Accepted declarations get their icon paths rooted at
//! the extension folder and are appended to the catalog; rejected ones are
//! reported once to the collector and dropped.

use crate::catalog::{CommandCatalog, SealedCatalog};
use crate::error::CatalogError;
use crate::icon::resolve_icon;
use crate::validation::{Decoded, decode};
use serde_json::Value;
use std::path::PathBuf;

/// Identity and install location of a contributing extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionDescription {
    pub id: String,
    pub extension_folder_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Per-extension diagnostic sink.
pub trait MessageCollector {
    fn error(&mut self, message: String);
    fn warn(&mut self, message: String);
    fn info(&mut self, message: String);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub extension_id: String,
    pub text: String,
}

/// Collector that records messages tagged with the extension id and mirrors
/// them to `tracing`.
#[derive(Debug)]
pub struct ExtensionMessages {
    extension_id: String,
    messages: Vec<Message>,
}

impl ExtensionMessages {
    pub fn new(extension_id: impl Into<String>) -> Self {
        Self {
            extension_id: extension_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|message| message.severity == Severity::Error)
    }

    fn record(&mut self, severity: Severity, text: String) {
        match severity {
            Severity::Error => tracing::error!(extension = %self.extension_id, "{text}"),
            Severity::Warning => tracing::warn!(extension = %self.extension_id, "{text}"),
            Severity::Info => tracing::info!(extension = %self.extension_id, "{text}"),
        }
        self.messages.push(Message {
            severity,
            extension_id: self.extension_id.clone(),
            text,
        });
    }
}

impl MessageCollector for ExtensionMessages {
    fn error(&mut self, message: String) {
        self.record(Severity::Error, message);
    }

    fn warn(&mut self, message: String) {
        self.record(Severity::Warning, message);
    }

    fn info(&mut self, message: String) {
        self.record(Severity::Info, message);
    }
}

/// What one extension contributes to the `commands` point.
pub struct ExtensionPointUser<C> {
    pub description: ExtensionDescription,
    pub value: Value,
    pub collector: C,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Validate, normalize and catalog one extension's command contributions.
///
/// `raw` is either a single declaration or an array of them; arrays are
/// handled element by element in order. Fails with [`CatalogError::Sealed`]
/// before looking at `raw` when the catalog has already been sealed.
pub fn process(
    catalog: &mut CommandCatalog,
    raw: &Value,
    collector: &mut dyn MessageCollector,
    description: &ExtensionDescription,
) -> Result<ProcessSummary, CatalogError> {
    catalog.ensure_loading()?;
    let mut summary = ProcessSummary::default();
    match raw {
        Value::Array(candidates) => {
            for candidate in candidates {
                handle_command(catalog, candidate, collector, description, &mut summary)?;
            }
        }
        candidate => handle_command(catalog, candidate, collector, description, &mut summary)?,
    }
    Ok(summary)
}

fn handle_command(
    catalog: &mut CommandCatalog,
    candidate: &Value,
    collector: &mut dyn MessageCollector,
    description: &ExtensionDescription,
    summary: &mut ProcessSummary,
) -> Result<(), CatalogError> {
    match decode(candidate) {
        Decoded::Valid(mut command) => {
            if let Some(icon) = command.icon.as_mut() {
                resolve_icon(icon, &description.extension_folder_path);
            }
            tracing::debug!(
                extension = %description.id,
                command = %command.command,
                "accepted command contribution"
            );
            catalog.push(command)?;
            summary.accepted += 1;
        }
        Decoded::Rejected(rejects) => {
            summary.rejected += 1;
            if rejects.is_empty() {
                return Ok(());
            }
            collector.error(format!(
                "Invalid `contributes.commands`: {}",
                rejects.join("\n")
            ));
        }
    }
    Ok(())
}

/// Process every extension's contribution in order, then seal the catalog.
pub fn handle_extensions<'a, C, I>(
    catalog: &mut CommandCatalog,
    users: I,
) -> Result<SealedCatalog, CatalogError>
where
    C: MessageCollector + 'a,
    I: IntoIterator<Item = &'a mut ExtensionPointUser<C>>,
{
    catalog.ensure_loading()?;
    for user in users {
        let ExtensionPointUser {
            description,
            value,
            collector,
        } = user;
        process(catalog, value, collector, description)?;
    }
    catalog.seal()
}
