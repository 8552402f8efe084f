//! Level Feature Model
//!
//! An ordered catalog of levels. Order is the progression order learners
//! move through and is never re-sorted.
//!
//! Lookup discipline: [`LevelCatalog::level`], [`LevelCatalog::allowed_nodes`]
//! and [`LevelCatalog::feature_flags`] are strict and return
//! [`CurriculumError::LevelNotFound`] for an unknown id. Use
//! [`LevelCatalog::has_level`] first when probing.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CurriculumError, Result};
use crate::features::{self, AccumulatedFeatures};
use crate::language::{FeatureFlags, Language, LanguageFeatures};
use crate::suggest;

/// A stage of the curriculum gating which constructs a learner may use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Stable id, used as a foreign key by the syllabus (e.g. "fundamentals")
    pub id: String,
    pub title: String,
    /// Learner facing: what is learned at this level
    pub description: String,
    /// Internal facing: the educational goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_goal: Option<String>,
    /// Per-language restrictions
    #[serde(default)]
    pub language_features: BTreeMap<Language, LanguageFeatures>,
}

impl Level {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            educational_goal: None,
            language_features: BTreeMap::new(),
        }
    }

    /// Builder-style helper used when authoring levels in code
    pub fn with_language(mut self, language: Language, features: LanguageFeatures) -> Self {
        self.language_features.insert(language, features);
        self
    }

    /// Features configured for `language`, if any
    pub fn features(&self, language: Language) -> Option<&LanguageFeatures> {
        self.language_features.get(&language)
    }

    /// Languages this level configures
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.language_features.keys().copied()
    }
}

/// A single level's nodes and flags flattened together
///
/// Serializes as `{ "allowedNodes": [...], "<flag>": <value>, ... }`, the shape
/// interpreters take as their language-feature input.
pub type LanguageFeatureSummary = AccumulatedFeatures;

/// Ordered, immutable collection of levels
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: Vec<Level>,
    index: HashMap<String, usize>,
}

impl LevelCatalog {
    /// Build a catalog from levels in progression order
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        let mut index = HashMap::with_capacity(levels.len());
        for (position, level) in levels.iter().enumerate() {
            if index.insert(level.id.clone(), position).is_some() {
                return Err(CurriculumError::DuplicateLevel(level.id.clone()));
            }
        }
        Ok(Self { levels, index })
    }

    /// Strict lookup by id
    pub fn level(&self, id: &str) -> Result<&Level> {
        self.index
            .get(id)
            .map(|&position| &self.levels[position])
            .ok_or_else(|| CurriculumError::LevelNotFound {
                id: id.to_string(),
                suggestion: suggest::closest(id, self.level_ids()),
            })
    }

    /// Whether a level with this id exists
    pub fn has_level(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of the level in progression order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All level ids in progression order
    pub fn level_ids(&self) -> Vec<&str> {
        self.levels.iter().map(|l| l.id.as_str()).collect()
    }

    /// All levels in progression order
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Permitted node kinds, or `None` if the level does not configure the language
    pub fn allowed_nodes(&self, level_id: &str, language: Language) -> Result<Option<&[String]>> {
        let level = self.level(level_id)?;
        Ok(level
            .features(language)
            .and_then(|f| f.allowed_nodes.as_deref()))
    }

    /// Feature flags, or `None` if the level does not configure the language
    pub fn feature_flags(&self, level_id: &str, language: Language) -> Result<Option<&FeatureFlags>> {
        let level = self.level(level_id)?;
        Ok(level
            .features(language)
            .and_then(|f| f.feature_flags.as_ref()))
    }

    /// One level's features flattened for the interpreter (not accumulated)
    ///
    /// Empty for an unknown level or an unconfigured language.
    pub fn language_features(&self, level_id: &str, language: Language) -> LanguageFeatureSummary {
        self.index
            .get(level_id)
            .and_then(|&position| self.levels[position].features(language))
            .map(LanguageFeatureSummary::from_features)
            .unwrap_or_default()
    }

    /// Everything permitted by the time a learner reaches `level_id`, inclusive
    ///
    /// Empty for an unknown level.
    pub fn accumulated_language_features(&self, level_id: &str, language: Language) -> AccumulatedFeatures {
        match self.position(level_id) {
            Some(position) => features::accumulate(&self.levels[..=position], language),
            None => AccumulatedFeatures::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::FlagValue;

    fn js(nodes: &[&str], flags: &[(&str, bool)]) -> LanguageFeatures {
        LanguageFeatures {
            allowed_nodes: Some(nodes.iter().map(|n| n.to_string()).collect()),
            feature_flags: Some(
                flags
                    .iter()
                    .map(|(k, v)| (k.to_string(), FlagValue::Bool(*v)))
                    .collect(),
            ),
        }
    }

    fn catalog() -> LevelCatalog {
        LevelCatalog::new(vec![
            Level::new("fundamentals", "Programming Fundamentals", "Function calls and literal values")
                .with_language(
                    Language::JavaScript,
                    js(&["ExpressionStatement", "Literal"], &[("allowTruthiness", false)]),
                ),
            Level::new("variables", "Variables and Assignments", "Declare variables")
                .with_language(
                    Language::JavaScript,
                    js(
                        &["ExpressionStatement", "Literal", "VariableDeclaration"],
                        &[("requireVariableInstantiation", true)],
                    ),
                ),
        ])
        .unwrap()
    }

    #[test]
    fn test_level_lookup() {
        let catalog = catalog();
        let level = catalog.level("fundamentals").unwrap();
        assert_eq!(level.title, "Programming Fundamentals");
        assert!(catalog.has_level("variables"));
        assert!(!catalog.has_level(""));
    }

    #[test]
    fn test_unknown_level_is_an_error() {
        let catalog = catalog();
        let err = catalog.level("invalid-level").unwrap_err();
        assert!(err.to_string().starts_with("Level 'invalid-level' not found"));

        match catalog.level("variable").unwrap_err() {
            CurriculumError::LevelNotFound { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("variables"));
            }
            other => panic!("Expected LevelNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let result = LevelCatalog::new(vec![
            Level::new("fundamentals", "A", "a"),
            Level::new("fundamentals", "B", "b"),
        ]);
        assert!(matches!(result, Err(CurriculumError::DuplicateLevel(id)) if id == "fundamentals"));
    }

    #[test]
    fn test_ids_in_declared_order() {
        assert_eq!(catalog().level_ids(), vec!["fundamentals", "variables"]);
    }

    #[test]
    fn test_allowed_nodes_absent_for_unconfigured_language() {
        let catalog = catalog();
        assert_eq!(catalog.allowed_nodes("fundamentals", Language::Python).unwrap(), None);
        assert_eq!(
            catalog.allowed_nodes("fundamentals", Language::JavaScript).unwrap().unwrap().len(),
            2
        );
        assert!(catalog.feature_flags("nope", Language::JavaScript).is_err());
    }

    #[test]
    fn test_language_features_is_single_level() {
        let catalog = catalog();
        let summary = catalog.language_features("variables", Language::JavaScript);
        assert_eq!(summary.flags.get("allowTruthiness"), None);
        assert_eq!(
            summary.flags.get("requireVariableInstantiation"),
            Some(&FlagValue::Bool(true))
        );

        assert!(catalog.language_features("missing", Language::JavaScript).is_empty());
        assert!(catalog.language_features("variables", Language::Python).is_empty());
    }
}
