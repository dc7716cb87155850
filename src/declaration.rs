//! Typed command declarations.
//!
//! These are the shapes that come out of [`crate::validation::decode`]. Raw
//! contribution JSON never reaches the catalog directly; it is checked by the
//! shape validator first and only then converted into a [`Command`].

use serde::Serialize;
use serde::ser::Serializer;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Placement sites a command may be contributed to besides the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Where {
    EditorPrimary,
    EditorSecondary,
    ExplorerContext,
}

impl Where {
    pub const ALL: [Where; 3] = [
        Where::EditorPrimary,
        Where::EditorSecondary,
        Where::ExplorerContext,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Where::EditorPrimary => "editor/primary",
            Where::EditorSecondary => "editor/secondary",
            Where::ExplorerContext => "explorer/context",
        }
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Where {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Where::ALL
            .into_iter()
            .find(|site| site.as_str() == value)
            .ok_or_else(|| anyhow::anyhow!("unknown placement site '{value}'"))
    }
}

impl Serialize for Where {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Resource matcher used in `when` clauses. Purely descriptive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResourceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ResourceFilter {
    fn from_map(map: &serde_json::Map<String, Value>) -> Self {
        let field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            language: field("language"),
            scheme: field("scheme"),
            pattern: field("pattern"),
        }
    }
}

/// Condition under which a contributed command is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WhenClause {
    Expression(String),
    Filter(ResourceFilter),
    List(Vec<WhenClause>),
}

impl WhenClause {
    /// Lenient conversion from an already validated `when` value.
    ///
    /// Returns `None` for values that are neither string, object nor array.
    /// List entries of other types are dropped.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(expr) => Some(WhenClause::Expression(expr.clone())),
            Value::Object(map) => Some(WhenClause::Filter(ResourceFilter::from_map(map))),
            Value::Array(items) => {
                let mut clauses = Vec::with_capacity(items.len());
                for item in items {
                    match WhenClause::from_value(item) {
                        Some(clause) => clauses.push(clause),
                        None => tracing::debug!(entry = %item, "ignoring non-matcher `when` entry"),
                    }
                }
                Some(WhenClause::List(clauses))
            }
            _ => None,
        }
    }
}

/// One placement of a command in a menu or toolbar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Context {
    #[serde(rename = "where")]
    pub placement: Where,
    pub when: WhenClause,
}

/// Icon pair selected by the active theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemableIcon {
    pub dark: PathBuf,
    pub light: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Icon {
    Path(PathBuf),
    Themed(ThemableIcon),
}

/// An accepted command declaration.
///
/// Once a `Command` has been appended to a catalog its icon paths are
/// absolute, rooted at the contributing extension's folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Command {
    pub command: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(
        rename = "context",
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_contexts"
    )]
    pub contexts: Vec<Context>,
}

impl Command {
    /// Display string used by the command palette.
    pub fn label(&self) -> String {
        match &self.category {
            Some(category) => format!("{category}: {}", self.title),
            None => self.title.clone(),
        }
    }

    /// Activation event that must fire before the command is dispatched.
    pub fn activation_event(&self) -> String {
        format!("onCommand:{}", self.command)
    }

    pub fn appears_in(&self, placement: Where) -> bool {
        self.contexts.iter().any(|ctx| ctx.placement == placement)
    }
}

// A lone context is written back as an object so the output keeps the shape
// most declarations are authored in.
fn serialize_contexts<S: Serializer>(contexts: &[Context], serializer: S) -> Result<S::Ok, S::Error> {
    match contexts {
        [single] => single.serialize(serializer),
        many => many.serialize(serializer),
    }
}
