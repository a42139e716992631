//! The rule table: which child components are recognized inside a wrapper,
//! what they are renamed to, and which module must declare the new name.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default wrapper sentinel and its replacement identity.
pub const DEFAULT_WRAPPER: &str = "FormItemExt";
pub const DEFAULT_WRAPPER_REPLACEMENT: &str = "Form.Item";

/// A component identity: either a simple name (`Input`) or a qualified
/// object.property name (`DatePickerExt.RangePicker`).
///
/// Comparison is exact and case-sensitive on every segment; no partial
/// matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ComponentIdentity {
    Simple(String),
    Qualified { object: String, property: String },
}

impl ComponentIdentity {
    /// Parse an identity string. At most one `.` separator is accepted.
    pub fn parse(s: &str) -> Result<Self, RuleError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::EmptyIdentity);
        }

        match s.split_once('.') {
            None => Ok(ComponentIdentity::Simple(s.to_string())),
            Some((object, property)) => {
                if object.is_empty() || property.is_empty() || property.contains('.') {
                    return Err(RuleError::InvalidIdentity {
                        identity: s.to_string(),
                    });
                }
                Ok(ComponentIdentity::Qualified {
                    object: object.to_string(),
                    property: property.to_string(),
                })
            }
        }
    }

    /// Whether this identity matches a whitespace-normalized element name.
    pub fn matches(&self, name_text: &str) -> bool {
        match self {
            ComponentIdentity::Simple(name) => name == name_text,
            ComponentIdentity::Qualified { object, property } => name_text
                .split_once('.')
                .is_some_and(|(o, p)| o == object && p == property),
        }
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentIdentity::Simple(name) => write!(f, "{name}"),
            ComponentIdentity::Qualified { object, property } => write!(f, "{object}.{property}"),
        }
    }
}

impl TryFrom<String> for ComponentIdentity {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ComponentIdentity::parse(&value)
    }
}

/// One rewrite rule: a recognized child identity, the name it is renamed to,
/// and the module that must declare the new name.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRule {
    /// Child identity to recognize inside a wrapper.
    #[serde(rename = "match")]
    pub match_identity: ComponentIdentity,
    /// New tag name for the child (may itself be qualified).
    #[serde(rename = "replacement")]
    pub replacement_name: String,
    /// Module the replacement must be imported from.
    #[serde(rename = "from")]
    pub declared_from: String,
}

impl RewriteRule {
    /// The local name an import must bind for the replacement to resolve:
    /// the root segment of the replacement name.
    pub fn declared_local(&self) -> &str {
        self.replacement_name
            .split('.')
            .next()
            .unwrap_or(&self.replacement_name)
    }
}

/// The full, read-only configuration of one transform run.
///
/// The wrapper sentinel and its replacement are configurable so the simpler
/// fixed-pair variants are just shorter tables, not different engines.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleTable {
    #[serde(default = "default_wrapper")]
    pub wrapper: String,
    #[serde(default = "default_wrapper_replacement")]
    pub wrapper_replacement: String,
    #[serde(default)]
    pub rules: Vec<RewriteRule>,
}

fn default_wrapper() -> String {
    DEFAULT_WRAPPER.to_string()
}

fn default_wrapper_replacement() -> String {
    DEFAULT_WRAPPER_REPLACEMENT.to_string()
}

impl Default for RuleTable {
    /// The built-in table mirroring the original migration: `Input` and
    /// `Select` become their outline variants, both declared from `lib-ext`.
    fn default() -> Self {
        Self {
            wrapper: default_wrapper(),
            wrapper_replacement: default_wrapper_replacement(),
            rules: vec![
                RewriteRule {
                    match_identity: ComponentIdentity::Simple("Input".to_string()),
                    replacement_name: "InputOutLineExt".to_string(),
                    declared_from: "lib-ext".to_string(),
                },
                RewriteRule {
                    match_identity: ComponentIdentity::Simple("Select".to_string()),
                    replacement_name: "SelectOutLineExt".to_string(),
                    declared_from: "lib-ext".to_string(),
                },
            ],
        }
    }
}

impl RuleTable {
    /// Look up the rule for a whitespace-normalized element name.
    /// First match wins; rules are checked in declared order.
    pub fn lookup(&self, name_text: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|r| r.match_identity.matches(name_text))
    }

    /// Whether an element name is the wrapper sentinel.
    pub fn is_wrapper(&self, name_text: &str) -> bool {
        self.wrapper == name_text
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        if self.wrapper.trim().is_empty() {
            return Err(RuleError::MissingField { field: "wrapper" });
        }
        if self.wrapper_replacement.trim().is_empty() {
            return Err(RuleError::MissingField {
                field: "wrapper_replacement",
            });
        }
        for rule in &self.rules {
            if rule.replacement_name.trim().is_empty() {
                return Err(RuleError::MissingField {
                    field: "rules.replacement",
                });
            }
            if rule.declared_from.trim().is_empty() {
                return Err(RuleError::MissingField { field: "rules.from" });
            }
        }
        Ok(())
    }

    pub fn from_toml_str(input: &str) -> Result<Self, RuleError> {
        let table: RuleTable = toml_edit::de::from_str(input)
            .map_err(|source| RuleError::Toml { path: None, source })?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_str(input: &str) -> Result<Self, RuleError> {
        let table: RuleTable = serde_json::from_str(input)
            .map_err(|source| RuleError::Json { path: None, source })?;
        table.validate()?;
        Ok(table)
    }

    /// Load a rule table from a `.toml` or `.json` file, dispatching on the
    /// extension (TOML when in doubt).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let result = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        };
        result.map_err(|error| error.with_path(path))
    }
}

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("component identity is empty")]
    EmptyIdentity,

    #[error("invalid component identity: {identity:?}")]
    InvalidIdentity { identity: String },

    #[error("rule table missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("failed to read rule table from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse rule table TOML{}: {source}", fmt_path(.path))]
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },

    #[error("failed to parse rule table JSON{}: {source}", fmt_path(.path))]
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

impl RuleError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            RuleError::Toml { path: None, source } => RuleError::Toml {
                path: Some(path),
                source,
            },
            RuleError::Json { path: None, source } => RuleError::Json {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

fn fmt_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" ({})", path.display()),
        None => String::new(),
    }
}
