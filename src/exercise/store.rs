//! Exercise Definition Store
//!
//! Slug-keyed, populated once, never mutated. [`ExerciseStore::get`] is the
//! strict lookup: an unknown slug is an authoring error and comes back as
//! [`CurriculumError::ExerciseNotFound`].

use std::collections::HashMap;

use super::basic_movement::BasicMovementExercise;
use super::definition::{Expectation, ExerciseDefinition, Scenario, Task};
use super::Primitive;
use crate::error::{CurriculumError, Result};
use crate::suggest;

#[derive(Debug, Clone, Default)]
pub struct ExerciseStore {
    definitions: Vec<ExerciseDefinition>,
    index: HashMap<String, usize>,
}

impl ExerciseStore {
    /// Build a store; slugs must be unique
    pub fn new(definitions: Vec<ExerciseDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.slug.clone(), position).is_some() {
                return Err(CurriculumError::DuplicateExercise(definition.slug.clone()));
            }
        }
        Ok(Self { definitions, index })
    }

    /// The exercises that ship with the crate
    pub fn builtin() -> Self {
        let definitions = vec![basic_movement()];
        let index = definitions
            .iter()
            .enumerate()
            .map(|(position, d)| (d.slug.clone(), position))
            .collect();
        Self { definitions, index }
    }

    /// Strict lookup by slug
    pub fn get(&self, slug: &str) -> Result<&ExerciseDefinition> {
        self.index
            .get(slug)
            .map(|&position| &self.definitions[position])
            .ok_or_else(|| CurriculumError::ExerciseNotFound {
                slug: slug.to_string(),
                suggestion: suggest::closest(slug, self.slugs()),
            })
    }

    pub fn has(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    /// Slugs in registration order
    pub fn slugs(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.slug.as_str()).collect()
    }

    pub fn definitions(&self) -> &[ExerciseDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn basic_movement() -> ExerciseDefinition {
    let mut definition = ExerciseDefinition::new(
        "basic-movement",
        "Basic Movement",
        "fundamentals",
        BasicMovementExercise::boxed,
    );
    definition.instructions =
        "Move the character to the right by calling move() five times.".to_string();
    definition.estimated_minutes = 5;
    definition.initial_code = Some("// Call move() to move the character\n".to_string());
    definition.hints = vec![
        "Each call to move() moves the character one step.".to_string(),
        "Put each call on its own line.".to_string(),
    ];
    definition.tasks = vec![Task {
        id: "move-character".to_string(),
        name: "Move the character".to_string(),
        description: "Get the character to the finish line.".to_string(),
        hints: vec!["Five steps of 20 reach position 100.".to_string()],
        required_scenarios: vec!["move-five-times".to_string(), "start-further-along".to_string()],
        bonus: false,
    }];
    definition.scenarios = vec![
        Scenario {
            slug: "move-five-times".to_string(),
            name: "Move five times".to_string(),
            description: "Start at the left edge and move five times.".to_string(),
            task_id: "move-character".to_string(),
            setup: Default::default(),
            expectations: vec![Expectation {
                key: "position".to_string(),
                expected: Primitive::Int(100),
            }],
        },
        Scenario {
            slug: "start-further-along".to_string(),
            name: "Start further along".to_string(),
            description: "Start at position 40 and move five times.".to_string(),
            task_id: "move-character".to_string(),
            setup: [("position".to_string(), Primitive::Int(40))].into_iter().collect(),
            expectations: vec![Expectation {
                key: "position".to_string(),
                expected: Primitive::Int(140),
            }],
        },
    ];
    definition
}
