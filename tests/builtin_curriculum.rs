//! Built-in Curriculum Tests
//!
//! Checks the data bundle compiled into the crate against the invariants the
//! interpreters and the front end rely on.

use std::sync::Arc;
use std::thread;

use curriculum::{
    BasicMovementExercise, Curriculum, CurriculumError, FlagValue, Language, LessonType,
    Primitive, SimulatedClock,
};

fn builtin() -> Curriculum {
    Curriculum::builtin().expect("built-in curriculum loads")
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn test_manifest_metadata() {
    let curriculum = builtin();
    assert_eq!(curriculum.manifest().name, "jiki-curriculum");
    assert_eq!(curriculum.version().to_string(), "v0.1.0");
    assert_eq!(curriculum.levels().level_ids(), vec!["fundamentals", "variables"]);
    assert_eq!(curriculum.checksum().as_str().len(), 64);
}

#[test]
fn test_builtin_is_clean() {
    let report = builtin().validate();
    assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
    assert!(!report.has_warnings(), "unexpected warnings: {:?}", report.warnings);
}

#[test]
fn test_checksum_is_stable_across_loads() {
    assert_eq!(builtin().checksum(), builtin().checksum());
}

// =============================================================================
// Levels and features
// =============================================================================

#[test]
fn test_every_level_has_content() {
    let curriculum = builtin();
    for level in curriculum.levels().levels() {
        assert!(!level.title.is_empty(), "{} has no title", level.id);
        assert!(!level.description.is_empty(), "{} has no description", level.id);
        assert!(level.languages().count() > 0, "{} configures no language", level.id);

        for language in level.languages() {
            let nodes = curriculum
                .levels()
                .allowed_nodes(&level.id, language)
                .unwrap()
                .unwrap_or_default();
            assert!(!nodes.is_empty(), "{} has no {} nodes", level.id, language);
        }
    }
}

#[test]
fn test_later_levels_are_supersets() {
    let curriculum = builtin();
    let levels: Vec<_> = curriculum.levels().levels().collect();

    for language in Language::ALL {
        for pair in levels.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            let before = earlier.features(language).and_then(|f| f.allowed_nodes.clone());
            let after = later.features(language).and_then(|f| f.allowed_nodes.clone());
            if let (Some(before), Some(after)) = (before, after) {
                for node in &before {
                    assert!(
                        after.contains(node),
                        "{} drops {} {} allowed by {}",
                        later.id,
                        language,
                        node,
                        earlier.id
                    );
                }
            }
        }
    }
}

#[test]
fn test_fundamentals_flags() {
    let curriculum = builtin();
    let flags = curriculum
        .levels()
        .feature_flags("fundamentals", Language::JavaScript)
        .unwrap()
        .unwrap();
    assert_eq!(flags.get("allowTruthiness"), Some(&FlagValue::Bool(false)));
    assert_eq!(flags.get("enforceStrictEquality"), Some(&FlagValue::Bool(true)));
}

#[test]
fn test_accumulated_features_at_variables() {
    let curriculum = builtin();
    let js = curriculum.accumulated_language_features("variables", Language::JavaScript);

    assert!(js.allows("CallExpression"));
    assert!(js.allows("VariableDeclaration"));
    assert_eq!(
        js.flags.get("requireVariableInstantiation"),
        Some(&FlagValue::Bool(true))
    );
    // Carried over from fundamentals
    assert_eq!(js.flags.get("allowTruthiness"), Some(&FlagValue::Bool(false)));

    let python = curriculum.accumulated_language_features("variables", Language::Python);
    assert!(python.allows("Call"));
    assert!(python.allows("AugAssign"));
}

#[test]
fn test_interpreter_shape() {
    let curriculum = builtin();
    let features = curriculum.levels().language_features("fundamentals", Language::Python);
    let json = serde_json::to_value(&features).unwrap();

    assert!(json["allowedNodes"].is_array());
    assert_eq!(json["allowTruthiness"], serde_json::json!(false));
    assert!(json.get("featureFlags").is_none());
}

#[test]
fn test_unknown_level_lookups() {
    let curriculum = builtin();

    match curriculum.levels().level("fundamental") {
        Err(CurriculumError::LevelNotFound { id, suggestion }) => {
            assert_eq!(id, "fundamental");
            assert_eq!(suggestion.as_deref(), Some("fundamentals"));
        }
        other => panic!("Expected LevelNotFound, got {:?}", other),
    }

    assert!(curriculum
        .levels()
        .allowed_nodes("invalid-level", Language::JavaScript)
        .is_err());
    assert!(curriculum
        .accumulated_language_features("invalid-level", Language::JavaScript)
        .is_empty());
    assert!(curriculum
        .levels()
        .language_features("invalid-level", Language::Python)
        .is_empty());
}

// =============================================================================
// Syllabus and exercises
// =============================================================================

#[test]
fn test_navigation_across_levels() {
    let curriculum = builtin();
    let syllabus = curriculum.syllabus();

    assert_eq!(
        syllabus.next_lesson("first-function-call").map(|l| l.id.as_str()),
        Some("intro-variables")
    );
    assert_eq!(
        syllabus.previous_lesson("intro-variables").map(|l| l.id.as_str()),
        Some("first-function-call")
    );
    assert!(syllabus.next_lesson("intro-variables").is_none());
    assert!(syllabus.previous_lesson("first-function-call").is_none());
    assert!(syllabus.next_lesson("non-existent").is_none());
}

#[test]
fn test_every_exercise_lesson_resolves() {
    let curriculum = builtin();
    let exercise_lessons = curriculum.syllabus().exercise_lessons();
    assert!(!exercise_lessons.is_empty());

    for lesson in exercise_lessons {
        assert_eq!(lesson.lesson_type(), LessonType::Exercise);
        let slug = lesson.exercise_slug().unwrap();
        assert!(curriculum.exercises().has(slug), "{} is not registered", slug);
        assert!(curriculum.exercise_for_lesson(&lesson.id).is_some());
    }
}

#[test]
fn test_features_for_lesson() {
    let curriculum = builtin();
    let features = curriculum
        .features_for_lesson("first-function-call", Language::JavaScript)
        .unwrap();
    assert!(features.allows("CallExpression"));
    assert!(!features.allows("VariableDeclaration"));
    assert!(curriculum
        .features_for_lesson("non-existent", Language::JavaScript)
        .is_none());
}

#[test]
fn test_basic_movement_scenarios_pass_with_a_correct_solution() {
    let curriculum = builtin();
    let definition = curriculum.exercises().get("basic-movement").unwrap();

    for scenario in &definition.scenarios {
        let mut exercise = definition.create();
        scenario.prepare(exercise.as_mut()).unwrap();

        let mut clock = SimulatedClock::new();
        for _ in 0..5 {
            exercise.call("move", &mut clock, &[]).unwrap();
        }

        let results = scenario.evaluate(exercise.as_ref());
        assert!(
            results.iter().all(|r| r.pass),
            "{} failed: {:?}",
            scenario.slug,
            results
        );
        assert_eq!(exercise.animations().len(), 5);
    }
}

#[test]
fn test_basic_movement_scenario_reports_shortfall() {
    let curriculum = builtin();
    let definition = curriculum.exercises().get("basic-movement").unwrap();
    let scenario = definition.scenario("move-five-times").unwrap();

    let mut exercise = BasicMovementExercise::boxed();
    let mut clock = SimulatedClock::new();
    exercise.call("move", &mut clock, &[]).unwrap();

    let results = scenario.evaluate(exercise.as_ref());
    assert!(!results[0].pass);
    assert_eq!(results[0].actual, Primitive::Int(20));
    assert_eq!(
        results[0].error.as_deref(),
        Some("Expected position to be 100 but got 20")
    );
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_shared_across_threads() {
    let curriculum = Arc::new(builtin());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let curriculum = Arc::clone(&curriculum);
            thread::spawn(move || {
                curriculum
                    .accumulated_language_features("variables", Language::JavaScript)
                    .allowed_nodes
                    .map(|nodes| nodes.len())
            })
        })
        .collect();

    let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
    assert!(counts[0].unwrap_or(0) > 0);
}
