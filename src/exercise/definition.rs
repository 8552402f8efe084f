//! Exercise definitions: metadata, tasks and scenarios

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Exercise, Primitive};
use crate::error::ExerciseError;

/// A goal within an exercise, completed by passing its scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub hints: Vec<String>,
    /// Scenario slugs that must pass for the task to count as done
    #[serde(default)]
    pub required_scenarios: Vec<String>,
    #[serde(default)]
    pub bonus: bool,
}

/// Expected value of one state key after learner code has run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    pub key: String,
    pub expected: Primitive,
}

/// Result of checking one expectation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestExpect {
    pub pass: bool,
    pub actual: Primitive,
    pub expected: Primitive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A concrete starting setup plus the state it must end in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub task_id: String,
    /// Options applied through [`Exercise::configure`] before learner code runs
    #[serde(default)]
    pub setup: BTreeMap<String, Primitive>,
    pub expectations: Vec<Expectation>,
}

impl Scenario {
    /// Apply this scenario's setup to a fresh exercise
    pub fn prepare(&self, exercise: &mut dyn Exercise) -> Result<(), ExerciseError> {
        for (option, value) in &self.setup {
            exercise.configure(option, value)?;
        }
        Ok(())
    }

    /// Check every expectation against the exercise's current state
    pub fn evaluate(&self, exercise: &dyn Exercise) -> Vec<TestExpect> {
        let state = exercise.state();
        self.expectations
            .iter()
            .map(|expectation| {
                let actual = state.get(&expectation.key).cloned().unwrap_or(Primitive::Null);
                let pass = actual == expectation.expected;
                let error = (!pass).then(|| {
                    format!(
                        "Expected {} to be {} but got {}",
                        expectation.key, expectation.expected, actual
                    )
                });
                TestExpect {
                    pass,
                    actual,
                    expected: expectation.expected.clone(),
                    error,
                }
            })
            .collect()
    }
}

/// Metadata and factory for one exercise
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    pub slug: String,
    pub title: String,
    pub instructions: String,
    pub estimated_minutes: u32,
    /// Level the exercise is designed for
    pub level_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_code: Option<String>,
    pub hints: Vec<String>,
    pub tasks: Vec<Task>,
    pub scenarios: Vec<Scenario>,
    #[serde(skip)]
    factory: fn() -> Box<dyn Exercise>,
}

impl ExerciseDefinition {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        level_id: impl Into<String>,
        factory: fn() -> Box<dyn Exercise>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            instructions: String::new(),
            estimated_minutes: 0,
            level_id: level_id.into(),
            initial_code: None,
            hints: Vec::new(),
            tasks: Vec::new(),
            scenarios: Vec::new(),
            factory,
        }
    }

    /// Construct a fresh exercise instance
    pub fn create(&self) -> Box<dyn Exercise> {
        (self.factory)()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn scenario(&self, slug: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.slug == slug)
    }

    /// Scenarios belonging to a task, in declared order
    pub fn scenarios_for_task<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a Scenario> + 'a {
        self.scenarios.iter().filter(move |s| s.task_id == task_id)
    }
}

impl std::fmt::Debug for ExerciseDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseDefinition")
            .field("slug", &self.slug)
            .field("title", &self.title)
            .field("level_id", &self.level_id)
            .field("tasks", &self.tasks.len())
            .field("scenarios", &self.scenarios.len())
            .finish()
    }
}
