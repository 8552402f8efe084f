//! Lesson types

use serde::{Deserialize, Serialize};

/// A single unit of content within a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique across the whole syllabus
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kind-specific data, discriminated by `"type"`
    #[serde(flatten)]
    pub kind: LessonKind,
}

/// Lesson variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LessonKind {
    Exercise {
        /// Must resolve in the exercise store
        #[serde(rename = "exerciseSlug")]
        exercise_slug: String,
    },
    Tutorial {
        /// Markdown content or a reference to it
        #[serde(rename = "tutorialContent", default, skip_serializing_if = "Option::is_none")]
        tutorial_content: Option<String>,
    },
    Challenge {
        #[serde(rename = "challengeSlug", default, skip_serializing_if = "Option::is_none")]
        challenge_slug: Option<String>,
    },
    Assessment {
        #[serde(rename = "assessmentSlug", default, skip_serializing_if = "Option::is_none")]
        assessment_slug: Option<String>,
    },
}

/// Discriminant of [`LessonKind`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonType {
    Exercise,
    Tutorial,
    Challenge,
    Assessment,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Exercise => "exercise",
            LessonType::Tutorial => "tutorial",
            LessonType::Challenge => "challenge",
            LessonType::Assessment => "assessment",
        }
    }
}

impl LessonKind {
    pub fn lesson_type(&self) -> LessonType {
        match self {
            LessonKind::Exercise { .. } => LessonType::Exercise,
            LessonKind::Tutorial { .. } => LessonType::Tutorial,
            LessonKind::Challenge { .. } => LessonType::Challenge,
            LessonKind::Assessment { .. } => LessonType::Assessment,
        }
    }
}

impl Lesson {
    pub fn exercise(
        id: impl Into<String>,
        title: impl Into<String>,
        exercise_slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            kind: LessonKind::Exercise {
                exercise_slug: exercise_slug.into(),
            },
        }
    }

    pub fn tutorial(id: impl Into<String>, title: impl Into<String>, content: Option<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            kind: LessonKind::Tutorial {
                tutorial_content: content,
            },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn lesson_type(&self) -> LessonType {
        self.kind.lesson_type()
    }

    pub fn is_exercise(&self) -> bool {
        matches!(self.kind, LessonKind::Exercise { .. })
    }

    /// Referenced exercise slug, for exercise lessons only
    pub fn exercise_slug(&self) -> Option<&str> {
        match &self.kind {
            LessonKind::Exercise { exercise_slug } => Some(exercise_slug),
            LessonKind::Tutorial { .. } | LessonKind::Challenge { .. } | LessonKind::Assessment { .. } => None,
        }
    }

    /// Slug of the external content this lesson points at, whatever its kind
    pub fn content_slug(&self) -> Option<&str> {
        match &self.kind {
            LessonKind::Exercise { exercise_slug } => Some(exercise_slug),
            LessonKind::Tutorial { .. } => None,
            LessonKind::Challenge { challenge_slug } => challenge_slug.as_deref(),
            LessonKind::Assessment { assessment_slug } => assessment_slug.as_deref(),
        }
    }
}
