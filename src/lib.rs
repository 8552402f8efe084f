//! Curriculum Registry
//!
//! Curriculum content for an educational coding platform: which exercises
//! exist, which language constructs a learner may use at each level, and the
//! order lessons are taught in.
//!
//! ## Features
//!
//! - **Level Feature Model**: per-level, per-language permitted syntax nodes and feature flags
//! - **Feature Accumulation**: cumulative restrictions at any point of the progression
//! - **Syllabus Navigation**: lesson lookup, next/previous, exercise listing
//! - **Exercise Store**: slug-keyed exercise definitions with a behavior contract
//! - **Validation**: cross-reference and authoring-convention checks
//!
//! ## Architecture
//!
//! ```text
//! data/ (embedded)  ──► loader ──► Curriculum ──► queries
//!   manifest.json                   ├── LevelCatalog
//!   syllabus.json                   ├── Syllabus
//!   levels/*.json                   └── ExerciseStore
//! ```
//!
//! Everything is immutable once built. Strict lookups (`level`,
//! `allowed_nodes`, `feature_flags`, exercise `get`) return errors for unknown
//! ids; navigation and accumulation return `None` or empty results.

pub mod checksum;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod exercise;
pub mod features;
pub mod language;
pub mod lesson;
pub mod level;
pub mod loader;
pub mod suggest;
pub mod syllabus;
pub mod validate;
pub mod version;

pub use checksum::Checksum;
pub use config::{CurriculumConfig, OutputFormat};
pub use curriculum::{Curriculum, Manifest};
pub use error::{CurriculumError, ExerciseError, Result};
pub use exercise::{
    Animation, BasicMovementExercise, ExecutionContext, Exercise, ExerciseDefinition,
    ExerciseFunction, ExerciseState, ExerciseStore, Primitive, Scenario, SimulatedClock, Task,
    TestExpect, View,
};
pub use features::AccumulatedFeatures;
pub use language::{FeatureFlags, FlagValue, Language, LanguageFeatures};
pub use lesson::{Lesson, LessonKind, LessonType};
pub use level::{Level, LevelCatalog};
pub use syllabus::{LevelProgression, Syllabus};
pub use validate::{Finding, ValidationReport, Validator};
pub use version::CurriculumVersion;
