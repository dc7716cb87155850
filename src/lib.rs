use anyhow::{Context, Result, bail};
use serde_json::Value;

pub mod action;
pub mod catalog;
pub mod config;
pub mod contribution;
pub mod declaration;
pub mod error;
pub mod icon;
pub mod manifest;
pub mod schema;
pub mod validation;

pub use action::{
    ActionPhase, ActivationService, CommandAction, CommandService, InvocationStatus,
};
pub use catalog::{CatalogPhase, CommandCatalog, CommandIndex, SealedCatalog};
pub use contribution::{
    ExtensionDescription, ExtensionMessages, ExtensionPointUser, Message, MessageCollector,
    ProcessSummary, Severity, handle_extensions, process,
};
pub use declaration::{
    Command, Context as CommandContext, Icon, ResourceFilter, ThemableIcon, WhenClause, Where,
};
pub use error::CatalogError;
pub use icon::resolve_icon;
pub use schema::{command_contribution_schema, lint_contribution};
pub use validation::{Decoded, decode, validate};

/// Extract the `contributes.commands` value from JSON text.
///
/// Accepts either a full extension manifest or a bare contribution (one
/// declaration object or an array of them).
pub fn parse_contribution(input: &str) -> Result<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No input provided");
    }

    let value: Value = serde_json::from_str(trimmed).context("Unable to parse contribution JSON")?;
    match value {
        Value::Object(ref map) if map.contains_key("contributes") => value
            .pointer("/contributes/commands")
            .cloned()
            .context("manifest does not contribute any commands"),
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => bail!("Unsupported JSON input; expected object or array"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn manifest_input_yields_commands_value() {
        let input = r#"{"name": "tools", "publisher": "acme",
            "contributes": {"commands": [{"command": "a", "title": "A"}]}}"#;
        assert_eq!(
            parse_contribution(input).unwrap(),
            json!([{"command": "a", "title": "A"}])
        );
    }

    #[test]
    fn bare_declaration_is_returned_as_is() {
        let input = r#"{"command": "a", "title": "A"}"#;
        assert_eq!(
            parse_contribution(input).unwrap(),
            json!({"command": "a", "title": "A"})
        );
    }

    #[test]
    fn manifest_without_commands_is_an_error() {
        assert!(parse_contribution(r#"{"contributes": {}}"#).is_err());
        assert!(parse_contribution("  ").is_err());
        assert!(parse_contribution("7").is_err());
    }
}
