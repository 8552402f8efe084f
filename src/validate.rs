//! Curriculum Validation
//!
//! Cross-reference and authoring checks that construction does not enforce.
//! A misauthored level or lesson still loads, so it can be inspected; this
//! pass is what reports it.
//!
//! ## Errors
//! - `duplicate-lesson-id`: lesson ids must be unique across the syllabus
//! - `unknown-level`: syllabus references a level that does not exist
//! - `unknown-exercise`: exercise lesson slug is not in the exercise store
//! - `non-monotonic-nodes`: a level drops a node kind an earlier level allowed
//! - `no-language`: a level configures no language
//! - `empty-nodes`: a configured language permits no node kinds
//! - `exercise-level`: an exercise names a level that does not exist
//! - `scenario-task` / `task-scenario`: task and scenario cross-references
//! - `reserved-flag`: a flag named `allowedNodes`
//!
//! ## Warnings
//! - `naming`, `title`, `tutorial-content`, `progression-order`, `level-without-lessons`
//! - `unknown-flag`: a flag the language's interpreter does not define

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::ValidationConfig;
use crate::curriculum::Curriculum;
use crate::features::ALLOWED_NODES_KEY;
use crate::language::Language;
use crate::lesson::LessonKind;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: &'static str,
    pub message: String,
    /// Where the problem is, e.g. `levels/variables/javascript`
    pub path: String,
}

/// Result of validating a curriculum
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether any finding carries `code`
    pub fn has(&self, code: &str) -> bool {
        self.errors.iter().chain(&self.warnings).any(|f| f.code == code)
    }

    fn error(&mut self, code: &'static str, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Finding {
            code,
            message: message.into(),
            path: path.into(),
        });
    }

    fn warning(&mut self, code: &'static str, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Finding {
            code,
            message: message.into(),
            path: path.into(),
        });
    }
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z-]+$").expect("id pattern is a valid regex"))
}

/// The curriculum validator
#[derive(Debug, Clone)]
pub struct Validator {
    /// Check that permitted nodes only ever grow along the progression
    pub check_monotonic: bool,
    /// Check id and title conventions
    pub check_naming: bool,
    /// Report warnings as errors
    pub strict: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            check_monotonic: true,
            check_naming: true,
            strict: false,
        }
    }
}

impl From<&ValidationConfig> for Validator {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            check_monotonic: config.check_monotonic,
            check_naming: config.check_naming,
            strict: config.strict,
        }
    }
}

impl Validator {
    pub fn validate(&self, curriculum: &Curriculum) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.check_levels(curriculum, &mut report);
        if self.check_monotonic {
            self.check_progression(curriculum, &mut report);
        }
        self.check_syllabus(curriculum, &mut report);
        self.check_exercises(curriculum, &mut report);

        if self.strict {
            let warnings = std::mem::take(&mut report.warnings);
            report.errors.extend(warnings);
        }

        for finding in report.errors.iter().chain(&report.warnings) {
            tracing::debug!(code = finding.code, path = %finding.path, "{}", finding.message);
        }

        report
    }

    fn check_levels(&self, curriculum: &Curriculum, report: &mut ValidationReport) {
        for level in curriculum.levels().levels() {
            let path = format!("levels/{}", level.id);

            if level.language_features.is_empty() {
                report.error("no-language", &path, format!("Level '{}' configures no language", level.id));
            }

            for (language, features) in &level.language_features {
                let language_path = format!("{}/{}", path, language);
                let empty = features.allowed_nodes.as_ref().map_or(true, |n| n.is_empty());
                if empty {
                    report.error(
                        "empty-nodes",
                        &language_path,
                        format!("Level '{}' permits no {} node kinds", level.id, language),
                    );
                }

                for name in features.feature_flags.iter().flat_map(|flags| flags.keys()) {
                    if name == ALLOWED_NODES_KEY {
                        // Would shadow the node list in the flattened output
                        report.error(
                            "reserved-flag",
                            &language_path,
                            format!("Level '{}' sets a {} flag named '{}'", level.id, language, name),
                        );
                    } else if !language.known_flags().contains(&name.as_str()) {
                        report.warning(
                            "unknown-flag",
                            &language_path,
                            format!("Level '{}' sets unknown {} flag '{}'", level.id, language, name),
                        );
                    }
                }
            }

            if self.check_naming && !id_pattern().is_match(&level.id) {
                report.warning(
                    "naming",
                    &path,
                    format!("Level id '{}' should be lowercase with hyphens", level.id),
                );
            }
        }
    }

    fn check_progression(&self, curriculum: &Curriculum, report: &mut ValidationReport) {
        for language in Language::ALL {
            // Union of everything earlier levels permitted
            let mut permitted: Vec<&str> = Vec::new();
            let mut introduced_by: HashMap<&str, &str> = HashMap::new();

            for level in curriculum.levels().levels() {
                let nodes = match level.features(language).and_then(|f| f.allowed_nodes.as_deref()) {
                    Some(nodes) if !nodes.is_empty() => nodes,
                    _ => continue,
                };
                let current: HashSet<&str> = nodes.iter().map(String::as_str).collect();

                for node in &permitted {
                    if !current.contains(node) {
                        report.error(
                            "non-monotonic-nodes",
                            format!("levels/{}/{}", level.id, language),
                            format!(
                                "Level '{}' drops {} node '{}' allowed since '{}'",
                                level.id,
                                language,
                                node,
                                introduced_by.get(node).copied().unwrap_or("?")
                            ),
                        );
                    }
                }

                for node in nodes {
                    if !introduced_by.contains_key(node.as_str()) {
                        introduced_by.insert(node, &level.id);
                        permitted.push(node);
                    }
                }
            }
        }
    }

    fn check_syllabus(&self, curriculum: &Curriculum, report: &mut ValidationReport) {
        let levels = curriculum.levels();
        let syllabus = curriculum.syllabus();
        let mut seen: HashSet<&str> = HashSet::new();

        let syllabus_order: Vec<&str> = syllabus.level_ids().filter(|id| levels.has_level(id)).collect();
        let positions: Vec<usize> = syllabus_order.iter().filter_map(|id| levels.position(id)).collect();
        if positions.windows(2).any(|w| w[0] >= w[1]) {
            report.warning(
                "progression-order",
                "syllabus",
                format!(
                    "Syllabus level order {:?} disagrees with manifest order {:?}",
                    syllabus_order,
                    levels.level_ids()
                ),
            );
        }

        for progression in syllabus.progression() {
            let level_path = format!("syllabus/{}", progression.level_id);

            if !levels.has_level(&progression.level_id) {
                report.error(
                    "unknown-level",
                    &level_path,
                    format!("Syllabus references unknown level '{}'", progression.level_id),
                );
            }

            if progression.lessons.is_empty() {
                report.warning(
                    "level-without-lessons",
                    &level_path,
                    format!("Level '{}' has no lessons yet", progression.level_id),
                );
            }

            for lesson in &progression.lessons {
                let path = format!("{}/{}", level_path, lesson.id);

                if !seen.insert(&lesson.id) {
                    report.error(
                        "duplicate-lesson-id",
                        &path,
                        format!("Lesson id '{}' is used more than once", lesson.id),
                    );
                }

                match &lesson.kind {
                    LessonKind::Exercise { exercise_slug } => {
                        if !curriculum.exercises().has(exercise_slug) {
                            report.error(
                                "unknown-exercise",
                                &path,
                                format!("Lesson '{}' references unknown exercise '{}'", lesson.id, exercise_slug),
                            );
                        }
                    }
                    LessonKind::Tutorial { tutorial_content } => {
                        let has_content = tutorial_content.as_deref().map_or(false, |c| !c.trim().is_empty());
                        let has_description = lesson.description.as_deref().map_or(false, |d| !d.trim().is_empty());
                        if !has_content && !has_description {
                            report.warning(
                                "tutorial-content",
                                &path,
                                format!("Tutorial '{}' has neither content nor description", lesson.id),
                            );
                        }
                    }
                    LessonKind::Challenge { .. } | LessonKind::Assessment { .. } => {}
                }

                if self.check_naming {
                    if !id_pattern().is_match(&lesson.id) {
                        report.warning(
                            "naming",
                            &path,
                            format!("Lesson id '{}' should be lowercase with hyphens", lesson.id),
                        );
                    }
                    let capitalized = lesson.title.chars().next().map_or(false, char::is_uppercase);
                    if lesson.title.chars().count() <= 3 || !capitalized {
                        report.warning(
                            "title",
                            &path,
                            format!("Lesson title '{}' should be capitalized and longer than 3 characters", lesson.title),
                        );
                    }
                }
            }
        }
    }

    fn check_exercises(&self, curriculum: &Curriculum, report: &mut ValidationReport) {
        for definition in curriculum.exercises().definitions() {
            let path = format!("exercises/{}", definition.slug);

            if !curriculum.levels().has_level(&definition.level_id) {
                report.error(
                    "exercise-level",
                    &path,
                    format!("Exercise '{}' targets unknown level '{}'", definition.slug, definition.level_id),
                );
            }

            for scenario in &definition.scenarios {
                if definition.task(&scenario.task_id).is_none() {
                    report.error(
                        "scenario-task",
                        format!("{}/{}", path, scenario.slug),
                        format!("Scenario '{}' belongs to unknown task '{}'", scenario.slug, scenario.task_id),
                    );
                }
            }

            for task in &definition.tasks {
                for slug in &task.required_scenarios {
                    if definition.scenario(slug).is_none() {
                        report.error(
                            "task-scenario",
                            format!("{}/{}", path, task.id),
                            format!("Task '{}' requires unknown scenario '{}'", task.id, slug),
                        );
                    }
                }
            }
        }
    }
}
