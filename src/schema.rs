//! Authoring-time JSON Schema for `contributes.commands`.
//!
//! Editors and the `contrib-lint` binary use this to give extension authors
//! suggestions. It is never consulted by [`crate::contribution::process`];
//! runtime acceptance is decided by [`crate::validation`] alone.

use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::{Value, json};
use std::sync::OnceLock;

use crate::declaration::Where;

fn filter_type() -> Value {
    json!({
        "type": "object",
        "properties": {
            "language": {
                "description": "Language identifier of the resource.",
                "type": "string"
            },
            "scheme": {
                "description": "URI scheme of the resource.",
                "type": "string"
            },
            "pattern": {
                "description": "Glob pattern matched against the resource path.",
                "type": "string"
            }
        }
    })
}

fn context_type() -> Value {
    let sites: Vec<&str> = Where::ALL.iter().map(Where::as_str).collect();
    json!({
        "type": "object",
        "required": ["where", "when"],
        "properties": {
            "where": {
                "description": "Menus and tool bars to which commands can be added, e.g. `editor title actions` or `explorer context menu`",
                "enum": sites
            },
            "when": {
                "description": "Condition that must be met in order to show the command. Can be a language identifier, a glob-pattern, an uri scheme, or a combination of them.",
                "anyOf": [
                    {"type": "string"},
                    filter_type(),
                    {"type": "array", "items": {"type": "string"}},
                    {"type": "array", "items": filter_type()}
                ]
            }
        }
    })
}

fn command_type() -> Value {
    json!({
        "type": "object",
        "required": ["command", "title"],
        "properties": {
            "command": {
                "description": "Identifier of the command to execute",
                "type": "string"
            },
            "title": {
                "description": "Title by which the command is represented in the UI",
                "type": "string"
            },
            "category": {
                "description": "(Optional) Category string by the command is grouped in the UI",
                "type": "string"
            },
            "icon": {
                "description": "(Optional) Icon which is used to represent the command in the UI. Either a file path or a themable configuration",
                "oneOf": [
                    {"type": "string"},
                    {
                        "type": "object",
                        "required": ["dark", "light"],
                        "properties": {
                            "light": {
                                "description": "Icon path when a light theme is used",
                                "type": "string"
                            },
                            "dark": {
                                "description": "Icon path when a dark theme is used",
                                "type": "string"
                            }
                        }
                    }
                ]
            },
            "context": {
                "description": "(Optional) Define places where the command should show in addition to the Command palette",
                "oneOf": [
                    context_type(),
                    {"type": "array", "items": context_type()}
                ]
            }
        }
    })
}

/// Schema for the `contributes.commands` manifest value.
pub fn command_contribution_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "description": "Contributes commands to the command palette.",
            "oneOf": [
                command_type(),
                {"type": "array", "items": command_type()}
            ]
        })
    })
}

/// Check `value` against the authoring schema.
///
/// Returns one `"<instance path>: <message>"` finding per schema violation;
/// an empty list means the value matches.
pub fn lint_contribution(value: &Value) -> Result<Vec<String>> {
    let compiled = JSONSchema::compile(command_contribution_schema())
        .context("compiling command contribution schema")?;
    let findings = match compiled.validate(value) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| {
                let path = err.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{path}: {err}")
            })
            .collect(),
    };
    Ok(findings)
}
