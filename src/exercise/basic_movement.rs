//! `basic-movement`: move a character right, one step per call.

use super::{
    resolve_function, Animation, Exercise, ExerciseFunction, ExerciseState, ExecutionContext,
    Primitive, Transformation, View,
};
use crate::error::ExerciseError;

const STEP: i64 = 20;
const WALL: i64 = 500;
const MOVE_DURATION_MS: u64 = 200;

const FUNCTIONS: &[ExerciseFunction] = &[ExerciseFunction {
    name: "move",
    arity: 0,
    description: Some("Move the character one step to the right"),
}];

#[derive(Debug)]
pub struct BasicMovementExercise {
    position: i64,
    animations: Vec<Animation>,
    view: View,
}

impl Default for BasicMovementExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicMovementExercise {
    pub fn new() -> Self {
        let mut view = View::allocate();
        view.push_element("character");
        Self {
            position: 0,
            animations: Vec::new(),
            view,
        }
    }

    /// Factory used by the exercise store
    pub fn boxed() -> Box<dyn Exercise> {
        Box::new(Self::new())
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    fn move_character(&mut self, ctx: &mut dyn ExecutionContext) -> Result<(), ExerciseError> {
        let target = self.position + STEP;
        if target > WALL {
            return Err(ExerciseError::Logic(
                "The character can't move any further, it has reached the wall".to_string(),
            ));
        }

        self.position = target;
        self.animations.push(Animation {
            targets: self.view.selector("character"),
            offset: ctx.current_time(),
            duration: Some(MOVE_DURATION_MS),
            easing: None,
            transformations: vec![Transformation::Left(self.position as f64)],
        });
        ctx.fast_forward(MOVE_DURATION_MS);
        Ok(())
    }
}

impl Exercise for BasicMovementExercise {
    fn available_functions(&self) -> &[ExerciseFunction] {
        FUNCTIONS
    }

    fn call(
        &mut self,
        name: &str,
        ctx: &mut dyn ExecutionContext,
        args: &[Primitive],
    ) -> Result<(), ExerciseError> {
        let function = resolve_function(FUNCTIONS, name, args)?;
        match function.name {
            "move" => self.move_character(ctx),
            other => Err(ExerciseError::UnknownFunction(other.to_string())),
        }
    }

    fn animations(&self) -> &[Animation] {
        &self.animations
    }

    fn view(&self) -> &View {
        &self.view
    }

    fn state(&self) -> ExerciseState {
        ExerciseState::from([("position".to_string(), Primitive::Int(self.position))])
    }

    fn configure(&mut self, option: &str, value: &Primitive) -> Result<(), ExerciseError> {
        match (option, value.as_int()) {
            ("position", Some(position)) if (0..=WALL).contains(&position) => {
                self.position = position;
                Ok(())
            }
            ("position", _) => Err(ExerciseError::Logic(format!(
                "Starting position must be an integer between 0 and {}",
                WALL
            ))),
            _ => Err(ExerciseError::Logic(format!("Unknown setup option '{}'", option))),
        }
    }
}
