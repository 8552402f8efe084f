//! Curriculum
//!
//! The root aggregate: manifest, ordered levels, syllabus and exercises,
//! bundled into one immutable value that is built once at startup and
//! passed to whatever needs to query it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;
use crate::config::CurriculumConfig;
use crate::error::{CurriculumError, Result};
use crate::exercise::{ExerciseDefinition, ExerciseStore};
use crate::features::AccumulatedFeatures;
use crate::language::Language;
use crate::level::{Level, LevelCatalog};
use crate::lesson::Lesson;
use crate::loader::{self, Bundle};
use crate::syllabus::Syllabus;
use crate::validate::{ValidationReport, Validator};
use crate::version::CurriculumVersion;

/// Bundle metadata: name, version and level progression order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: CurriculumVersion,
    /// Level ids in progression order
    pub levels: Vec<String>,
}

/// Immutable curriculum, safe to share across threads
#[derive(Debug, Clone)]
pub struct Curriculum {
    manifest: Manifest,
    levels: LevelCatalog,
    syllabus: Syllabus,
    exercises: ExerciseStore,
    checksum: Checksum,
}

impl Curriculum {
    /// Assemble a curriculum, ordering `levels` by the manifest
    ///
    /// Every manifest id needs exactly one level and every level must be
    /// listed. References from the syllabus are not checked here; see
    /// [`Curriculum::validate`].
    pub fn new(
        manifest: Manifest,
        levels: Vec<Level>,
        syllabus: Syllabus,
        exercises: ExerciseStore,
    ) -> Result<Self> {
        let mut listed = HashSet::with_capacity(manifest.levels.len());
        if let Some(repeated) = manifest.levels.iter().find(|id| !listed.insert(id.as_str())) {
            return Err(CurriculumError::DuplicateLevel(repeated.clone()));
        }

        let mut pending: Vec<Option<Level>> = levels.into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(manifest.levels.len());

        for id in &manifest.levels {
            let mut matches = pending
                .iter_mut()
                .filter(|slot| matches!(slot, Some(level) if level.id == *id));
            let level = matches
                .next()
                .and_then(Option::take)
                .ok_or_else(|| CurriculumError::MissingLevel(id.clone()))?;
            if matches.next().is_some() {
                return Err(CurriculumError::DuplicateLevel(id.clone()));
            }
            ordered.push(level);
        }

        if let Some(unlisted) = pending.into_iter().flatten().next() {
            return Err(CurriculumError::UnlistedLevel(unlisted.id));
        }

        let levels = LevelCatalog::new(ordered)?;
        let checksum = Checksum::from_json(&(
            &manifest,
            levels.levels().collect::<Vec<_>>(),
            &syllabus,
        ))?;

        Ok(Self {
            manifest,
            levels,
            syllabus,
            exercises,
            checksum,
        })
    }

    /// The curriculum compiled into the crate, with the built-in exercises
    pub fn builtin() -> Result<Self> {
        Self::from_bundle(loader::load_builtin()?, ExerciseStore::builtin())
    }

    /// Load curriculum data from a directory on disk
    pub fn from_directory(path: impl AsRef<Path>, exercises: ExerciseStore) -> Result<Self> {
        Self::from_bundle(loader::load_from_directory(path.as_ref())?, exercises)
    }

    /// Load from the configured data directory, or the built-in bundle
    pub fn from_config(config: &CurriculumConfig) -> Result<Self> {
        match config.data_dir() {
            Some(dir) => Self::from_directory(dir, ExerciseStore::builtin()),
            None => Self::builtin(),
        }
    }

    fn from_bundle(bundle: Bundle, exercises: ExerciseStore) -> Result<Self> {
        let curriculum = Self::new(bundle.manifest, bundle.levels, bundle.syllabus, exercises)?;
        tracing::info!(
            name = %curriculum.manifest.name,
            version = %curriculum.manifest.version,
            levels = curriculum.levels.len(),
            lessons = curriculum.syllabus.lesson_count(),
            exercises = curriculum.exercises.len(),
            checksum = curriculum.checksum.short(),
            "Loaded curriculum"
        );
        Ok(curriculum)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn version(&self) -> &CurriculumVersion {
        &self.manifest.version
    }

    pub fn levels(&self) -> &LevelCatalog {
        &self.levels
    }

    pub fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    pub fn exercises(&self) -> &ExerciseStore {
        &self.exercises
    }

    /// SHA256 over the manifest, levels and syllabus
    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    /// Cumulative features at `level_id`; see [`LevelCatalog::accumulated_language_features`]
    pub fn accumulated_language_features(&self, level_id: &str, language: Language) -> AccumulatedFeatures {
        self.levels.accumulated_language_features(level_id, language)
    }

    /// Cumulative features at the level a lesson belongs to
    pub fn features_for_lesson(&self, lesson_id: &str, language: Language) -> Option<AccumulatedFeatures> {
        self.syllabus
            .level_for_lesson(lesson_id)
            .map(|level_id| self.levels.accumulated_language_features(level_id, language))
    }

    /// Exercise definition behind an exercise lesson
    ///
    /// `None` for unknown lessons, non-exercise lessons and unresolved slugs.
    pub fn exercise_for_lesson(&self, lesson_id: &str) -> Option<&ExerciseDefinition> {
        self.syllabus
            .lesson(lesson_id)
            .and_then(Lesson::exercise_slug)
            .and_then(|slug| self.exercises.get(slug).ok())
    }

    /// Check references and authoring conventions with default settings
    pub fn validate(&self) -> ValidationReport {
        Validator::default().validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllabus::LevelProgression;

    fn manifest(levels: &[&str]) -> Manifest {
        Manifest {
            name: "test".into(),
            version: CurriculumVersion::new(0, 1, 0),
            levels: levels.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn syllabus() -> Syllabus {
        Syllabus::new(
            "Test Syllabus",
            vec![LevelProgression::new(
                "fundamentals",
                vec![Lesson::exercise("first-function-call", "First call", "basic-movement")],
            )],
        )
    }

    #[test]
    fn test_levels_ordered_by_manifest() {
        let curriculum = Curriculum::new(
            manifest(&["fundamentals", "variables"]),
            vec![Level::new("variables", "V", "v"), Level::new("fundamentals", "F", "f")],
            syllabus(),
            ExerciseStore::builtin(),
        )
        .unwrap();
        assert_eq!(curriculum.levels().level_ids(), vec!["fundamentals", "variables"]);
    }

    #[test]
    fn test_manifest_and_levels_must_agree() {
        let missing = Curriculum::new(
            manifest(&["fundamentals", "variables"]),
            vec![Level::new("fundamentals", "F", "f")],
            syllabus(),
            ExerciseStore::default(),
        );
        assert!(matches!(missing, Err(CurriculumError::MissingLevel(id)) if id == "variables"));

        let unlisted = Curriculum::new(
            manifest(&["fundamentals"]),
            vec![Level::new("fundamentals", "F", "f"), Level::new("loops", "L", "l")],
            syllabus(),
            ExerciseStore::default(),
        );
        assert!(matches!(unlisted, Err(CurriculumError::UnlistedLevel(id)) if id == "loops"));

        let duplicate = Curriculum::new(
            manifest(&["fundamentals"]),
            vec![Level::new("fundamentals", "F", "f"), Level::new("fundamentals", "G", "g")],
            syllabus(),
            ExerciseStore::default(),
        );
        assert!(matches!(duplicate, Err(CurriculumError::DuplicateLevel(_))));
    }

    #[test]
    fn test_manifest_listing_a_level_twice() {
        let repeated = Curriculum::new(
            manifest(&["fundamentals", "fundamentals"]),
            vec![Level::new("fundamentals", "F", "f")],
            syllabus(),
            ExerciseStore::default(),
        );
        assert!(matches!(repeated, Err(CurriculumError::DuplicateLevel(id)) if id == "fundamentals"));
    }

    #[test]
    fn test_exercise_for_lesson() {
        let curriculum = Curriculum::new(
            manifest(&["fundamentals"]),
            vec![Level::new("fundamentals", "F", "f")],
            syllabus(),
            ExerciseStore::builtin(),
        )
        .unwrap();
        let definition = curriculum.exercise_for_lesson("first-function-call").unwrap();
        assert_eq!(definition.slug, "basic-movement");
        assert!(curriculum.exercise_for_lesson("nope").is_none());
    }

    #[test]
    fn test_checksum_changes_with_content() {
        let build = |title: &str| {
            Curriculum::new(
                manifest(&["fundamentals"]),
                vec![Level::new("fundamentals", title, "f")],
                syllabus(),
                ExerciseStore::default(),
            )
            .unwrap()
        };
        assert_eq!(build("F").checksum(), build("F").checksum());
        assert_ne!(build("F").checksum(), build("G").checksum());
    }

    #[test]
    fn test_curriculum_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Curriculum>();
    }
}
