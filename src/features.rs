//! Feature accumulation across the level progression
//!
//! Node kinds are unioned in first-seen order. Flags fold last-write-wins:
//! a later level replaces an earlier level's value for the same key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::language::{FeatureFlags, Language, LanguageFeatures};
use crate::level::Level;

/// Key the node list occupies in the flattened output; no flag may use it
pub const ALLOWED_NODES_KEY: &str = "allowedNodes";

/// Flattened language features handed to an interpreter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedFeatures {
    /// Permitted node kinds; `None` when nothing is permitted
    #[serde(rename = "allowedNodes", default, skip_serializing_if = "Option::is_none")]
    pub allowed_nodes: Option<Vec<String>>,

    #[serde(flatten)]
    pub flags: FeatureFlags,
}

impl AccumulatedFeatures {
    /// Flatten a single level's descriptor
    pub fn from_features(features: &LanguageFeatures) -> Self {
        Self {
            allowed_nodes: features.allowed_nodes.clone(),
            flags: features.feature_flags.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_nodes.is_none() && self.flags.is_empty()
    }

    /// Whether `node` is permitted
    pub fn allows(&self, node: &str) -> bool {
        self.allowed_nodes
            .as_deref()
            .map_or(false, |nodes| nodes.iter().any(|n| n == node))
    }
}

/// Fold `levels`, in the given order, into the cumulative feature set for `language`
pub fn accumulate(levels: &[Level], language: Language) -> AccumulatedFeatures {
    let mut nodes: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut flags = FeatureFlags::new();

    for features in levels.iter().filter_map(|level| level.features(language)) {
        for node in features.allowed_nodes.iter().flatten() {
            if seen.insert(node.as_str()) {
                nodes.push(node.clone());
            }
        }
        if let Some(level_flags) = &features.feature_flags {
            for (name, value) in level_flags {
                flags.insert(name.clone(), value.clone());
            }
        }
    }

    AccumulatedFeatures {
        allowed_nodes: (!nodes.is_empty()).then_some(nodes),
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::FlagValue;

    fn level(id: &str, nodes: &[&str], flags: &[(&str, bool)]) -> Level {
        Level::new(id, id, id).with_language(
            Language::JavaScript,
            LanguageFeatures {
                allowed_nodes: Some(nodes.iter().map(|n| n.to_string()).collect()),
                feature_flags: Some(
                    flags
                        .iter()
                        .map(|(k, v)| (k.to_string(), FlagValue::Bool(*v)))
                        .collect(),
                ),
            },
        )
    }

    #[test]
    fn test_union_preserves_first_seen_order() {
        let levels = vec![
            level("fundamentals", &["ExpressionStatement", "Literal"], &[]),
            level("variables", &["ExpressionStatement", "Literal", "VariableDeclaration"], &[]),
        ];
        let result = accumulate(&levels, Language::JavaScript);
        assert_eq!(
            result.allowed_nodes.unwrap(),
            vec!["ExpressionStatement", "Literal", "VariableDeclaration"]
        );
    }

    #[test]
    fn test_later_level_flag_wins() {
        let levels = vec![
            level("a", &["Literal"], &[("allowTruthiness", false), ("allowShadowing", false)]),
            level("b", &["Literal"], &[]),
            level("c", &["Literal"], &[("allowTruthiness", true)]),
        ];

        let at_b = accumulate(&levels[..2], Language::JavaScript);
        assert_eq!(at_b.flags.get("allowTruthiness"), Some(&FlagValue::Bool(false)));

        let at_c = accumulate(&levels, Language::JavaScript);
        assert_eq!(at_c.flags.get("allowTruthiness"), Some(&FlagValue::Bool(true)));
        assert_eq!(at_c.flags.get("allowShadowing"), Some(&FlagValue::Bool(false)));
    }

    #[test]
    fn test_unconfigured_language_is_empty() {
        let levels = vec![level("a", &["Literal"], &[("allowTruthiness", false)])];
        let result = accumulate(&levels, Language::Python);
        assert!(result.is_empty());
        assert_eq!(result.allowed_nodes, None);
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let levels = vec![level("a", &["Literal"], &[("enforceStrictEquality", true)])];
        let json = serde_json::to_value(accumulate(&levels, Language::JavaScript)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "allowedNodes": ["Literal"], "enforceStrictEquality": true })
        );
    }

    #[test]
    fn test_empty_result_serializes_to_empty_object() {
        let json = serde_json::to_string(&AccumulatedFeatures::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
