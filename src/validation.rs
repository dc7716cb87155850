//! Shape validation for raw command contributions.
//!
//! Contributions arrive as untyped JSON from third-party manifests. The rules
//! below are field-specific and short-circuit: the first failing rule records
//! one message and stops. `decode` is the only way raw data becomes a
//! [`Command`].

use crate::declaration::{Command, Context, Icon, ThemableIcon, WhenClause, Where};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Outcome of decoding one raw declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    Valid(Command),
    Rejected(Vec<String>),
}

fn require_string(field: &str) -> String {
    format!("property `{field}` is mandatory and must be of type `string`")
}

fn optional_string(field: &str) -> String {
    format!("property `{field}` can be omitted or must be of type `string`")
}

const NON_EMPTY: &str = "expected non-empty value.";
const ICON_SHAPE: &str =
    "property `icon` can be omitted or must be either a string or a literal like `{dark, light}`";
const WHERE_ENUM: &str = "property `where` is mandatory and must be one of `editor/primary`, `editor/secondary`, or `explorer/context`";
const WHEN_SHAPE: &str =
    "property `when` is mandatory and must be like `{language, scheme, pattern}`";

/// Optional fields set to JSON `null` count as omitted.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn themable_pair(value: &Value) -> Option<(&str, &str)> {
    let dark = value.get("dark")?.as_str()?;
    let light = value.get("light")?.as_str()?;
    Some((dark, light))
}

fn is_valid_icon(icon: Option<&Value>, rejects: &mut Vec<String>) -> bool {
    match icon {
        None | Some(Value::String(_)) => true,
        Some(value @ Value::Object(_)) if themable_pair(value).is_some() => true,
        Some(_) => {
            rejects.push(ICON_SHAPE.to_string());
            false
        }
    }
}

fn placement(context: &Value) -> Option<Where> {
    context.get("where")?.as_str()?.parse().ok()
}

fn is_valid_context(context: &Value, rejects: &mut Vec<String>) -> bool {
    if placement(context).is_none() {
        rejects.push(WHERE_ENUM.to_string());
        return false;
    }
    match context.get("when") {
        Some(Value::String(_) | Value::Object(_) | Value::Array(_)) => true,
        _ => {
            rejects.push(WHEN_SHAPE.to_string());
            false
        }
    }
}

/// Check `candidate` against the command declaration rules.
///
/// Appends at most one message to `rejects` and returns whether the
/// candidate is acceptable.
pub fn validate(candidate: &Value, rejects: &mut Vec<String>) -> bool {
    let Some(object) = candidate.as_object() else {
        rejects.push(NON_EMPTY.to_string());
        return false;
    };
    if !matches!(object.get("command"), Some(Value::String(_))) {
        rejects.push(require_string("command"));
        return false;
    }
    if !matches!(object.get("title"), Some(Value::String(_))) {
        rejects.push(require_string("title"));
        return false;
    }
    if let Some(category) = present(object, "category") {
        if !category.is_string() {
            rejects.push(optional_string("category"));
            return false;
        }
    }
    if !is_valid_icon(present(object, "icon"), rejects) {
        return false;
    }
    match present(object, "context") {
        None => true,
        Some(Value::Array(contexts)) => contexts.iter().all(|ctx| is_valid_context(ctx, rejects)),
        Some(context) => is_valid_context(context, rejects),
    }
}

/// Validate `candidate` and, when it passes, convert it into a [`Command`].
pub fn decode(candidate: &Value) -> Decoded {
    let mut rejects = Vec::new();
    if !validate(candidate, &mut rejects) {
        return Decoded::Rejected(rejects);
    }
    match build_command(candidate) {
        Some(command) => Decoded::Valid(command),
        // validate() guarantees every field build_command reads
        None => Decoded::Rejected(rejects),
    }
}

fn build_command(candidate: &Value) -> Option<Command> {
    let object = candidate.as_object()?;
    let icon = match present(object, "icon") {
        None => None,
        Some(Value::String(path)) => Some(Icon::Path(PathBuf::from(path))),
        Some(value) => {
            let (dark, light) = themable_pair(value)?;
            Some(Icon::Themed(ThemableIcon {
                dark: PathBuf::from(dark),
                light: PathBuf::from(light),
            }))
        }
    };
    let contexts = match present(object, "context") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(build_context).collect::<Option<_>>()?,
        Some(single) => vec![build_context(single)?],
    };
    Some(Command {
        command: object.get("command")?.as_str()?.to_string(),
        title: object.get("title")?.as_str()?.to_string(),
        category: present(object, "category")
            .and_then(Value::as_str)
            .map(str::to_string),
        icon,
        contexts,
    })
}

fn build_context(context: &Value) -> Option<Context> {
    Some(Context {
        placement: placement(context)?,
        when: WhenClause::from_value(context.get("when")?)?,
    })
}
