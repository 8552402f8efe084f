//! Per-language feature descriptors
//!
//! Node kinds and flag names belong to the interpreter's vocabulary. They are
//! stored here as opaque strings and reported back unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source language a level can configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
}

impl Language {
    /// All supported languages, in reporting order
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::Python];

    /// Key used in data files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
        }
    }

    /// Flag names the interpreter understands for this language
    pub fn known_flags(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &[
                "allowShadowing",
                "allowTruthiness",
                "requireVariableInstantiation",
                "allowTypeCoercion",
                "oneStatementPerLine",
                "enforceStrictEquality",
            ],
            Language::Python => &["allowTruthiness", "allowTypeCoercion"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// Value of a single feature flag (boolean toggle or enum-like setting)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::Number(n) => write!(f, "{}", n),
            FlagValue::Text(s) => f.write_str(s),
        }
    }
}

/// Named feature flags, keyed by the interpreter's flag name
pub type FeatureFlags = BTreeMap<String, FlagValue>;

/// What one level permits for one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageFeatures {
    /// Syntax node kinds learner code may contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_nodes: Option<Vec<String>>,

    /// Semantics toggles enforced by the interpreter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_flags: Option<FeatureFlags>,
}

impl LanguageFeatures {
    /// Whether `node` is in the permitted set
    pub fn allows(&self, node: &str) -> bool {
        self.allowed_nodes
            .as_deref()
            .map_or(false, |nodes| nodes.iter().any(|n| n == node))
    }

    /// Look up a flag by name
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.feature_flags.as_ref().and_then(|flags| flags.get(name))
    }
}
