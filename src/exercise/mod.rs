//! Exercise behavior contract
//!
//! An exercise is the interactive world learner code operates on. The
//! interpreter calls the exercise's named functions, the front end renders
//! its view and plays its animations, and the test runner reads its state.
//!
//! The interpreter is reached only through the narrow [`ExecutionContext`]
//! trait, so this crate never depends on a concrete interpreter.

pub mod basic_movement;
pub mod definition;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::ExerciseError;

pub use basic_movement::BasicMovementExercise;
pub use definition::{Expectation, ExerciseDefinition, Scenario, Task, TestExpect};
pub use store::ExerciseStore;

/// What an exercise needs from the running interpreter
pub trait ExecutionContext {
    /// Current position on the execution timeline, in milliseconds
    fn current_time(&self) -> u64;

    /// Advance the timeline, e.g. to account for an animation's duration
    fn fast_forward(&mut self, milliseconds: u64);
}

/// A minimal timeline for running exercises outside an interpreter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatedClock {
    now: u64,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionContext for SimulatedClock {
    fn current_time(&self) -> u64 {
        self.now
    }

    fn fast_forward(&mut self, milliseconds: u64) {
        self.now = self.now.saturating_add(milliseconds);
    }
}

/// Primitive value passed to exercise functions or reported as state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Primitive {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Primitive::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Null => f.write_str("null"),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Int(n) => write!(f, "{}", n),
            Primitive::Float(x) => write!(f, "{}", x),
            Primitive::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Int(value)
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

/// Flat mapping of observable names to values
pub type ExerciseState = BTreeMap<String, Primitive>;

/// A function learner code may call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseFunction {
    pub name: &'static str,
    /// Number of arguments the function takes
    pub arity: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Timing curve of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

/// Visual change applied to an animation's targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transformation {
    Left(f64),
    Top(f64),
    TranslateX(f64),
    TranslateY(f64),
    Rotate(f64),
    Scale(f64),
    Opacity(f64),
}

/// One animation instruction for the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// Selector naming what to animate
    pub targets: String,
    /// Start time on the execution timeline, in milliseconds
    pub offset: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
    pub transformations: Vec<Transformation>,
}

/// An element the view contains, addressable by animations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewElement {
    pub class: String,
}

/// Handle to the exercise's renderable view
///
/// The front end owns rendering; this records the root id, visibility and the
/// elements the exercise populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub id: String,
    pub hidden: bool,
    pub elements: Vec<ViewElement>,
}

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

impl View {
    /// Allocate a hidden view with a process-unique id
    pub fn allocate() -> Self {
        let n = NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("exercise-{}", n),
            hidden: true,
            elements: Vec::new(),
        }
    }

    pub fn push_element(&mut self, class: impl Into<String>) {
        self.elements.push(ViewElement { class: class.into() });
    }

    /// Selector addressing an element of this view by class
    pub fn selector(&self, class: &str) -> String {
        format!("#{} .{}", self.id, class)
    }
}

/// The behavior contract every exercise implements
pub trait Exercise: Send {
    /// Functions exposed to learner code
    fn available_functions(&self) -> &[ExerciseFunction];

    /// Invoke a named function on behalf of learner code
    fn call(
        &mut self,
        name: &str,
        ctx: &mut dyn ExecutionContext,
        args: &[Primitive],
    ) -> Result<(), ExerciseError>;

    /// Animations produced so far, in the order they were produced
    fn animations(&self) -> &[Animation];

    fn view(&self) -> &View;

    /// Current observable state, used by scenario expectations
    fn state(&self) -> ExerciseState;

    /// Apply a scenario setup option before learner code runs
    fn configure(&mut self, option: &str, _value: &Primitive) -> Result<(), ExerciseError> {
        Err(ExerciseError::Logic(format!("Unknown setup option '{}'", option)))
    }
}

/// Resolve `name` against `functions` and check the argument count
pub fn resolve_function<'a>(
    functions: &'a [ExerciseFunction],
    name: &str,
    args: &[Primitive],
) -> Result<&'a ExerciseFunction, ExerciseError> {
    let function = functions
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| ExerciseError::UnknownFunction(name.to_string()))?;

    if function.arity != args.len() {
        return Err(ExerciseError::InvalidArguments {
            name: name.to_string(),
            expected: function.arity,
            actual: args.len(),
        });
    }

    Ok(function)
}
