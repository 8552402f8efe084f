//! Syllabus Sequencer
//!
//! The syllabus orders levels and, within each level, lessons. Navigation
//! treats the whole syllabus as one flattened sequence of lessons.
//!
//! Every query here is a pure read, and absence is reported as `None` or an
//! empty slice rather than an error.

use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;

/// Lessons belonging to one level, in teaching order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgression {
    pub level_id: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl LevelProgression {
    pub fn new(level_id: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self {
            level_id: level_id.into(),
            lessons,
        }
    }
}

/// The full ordered sequence of levels and their lessons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllabus {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub level_progression: Vec<LevelProgression>,
}

impl Syllabus {
    pub fn new(title: impl Into<String>, level_progression: Vec<LevelProgression>) -> Self {
        Self {
            title: title.into(),
            description: None,
            level_progression,
        }
    }

    /// Level progressions in declared order
    pub fn progression(&self) -> &[LevelProgression] {
        &self.level_progression
    }

    /// Level ids in syllabus order
    pub fn level_ids(&self) -> impl Iterator<Item = &str> {
        self.level_progression.iter().map(|p| p.level_id.as_str())
    }

    /// Every lesson, flattened across levels in declared order
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.level_progression.iter().flat_map(|p| p.lessons.iter())
    }

    pub fn lesson_count(&self) -> usize {
        self.level_progression.iter().map(|p| p.lessons.len()).sum()
    }

    /// Lessons of one level; empty if the level has none or is not in the syllabus
    pub fn lessons_for_level(&self, level_id: &str) -> &[Lesson] {
        self.level_progression
            .iter()
            .find(|p| p.level_id == level_id)
            .map(|p| p.lessons.as_slice())
            .unwrap_or_default()
    }

    /// Find a lesson by id; first match in declared order
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons().find(|l| l.id == lesson_id)
    }

    /// Id of the level a lesson belongs to
    pub fn level_for_lesson(&self, lesson_id: &str) -> Option<&str> {
        self.level_progression
            .iter()
            .find(|p| p.lessons.iter().any(|l| l.id == lesson_id))
            .map(|p| p.level_id.as_str())
    }

    /// Lesson immediately after `lesson_id` in the flattened order
    pub fn next_lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        let mut lessons = self.lessons();
        lessons.find(|l| l.id == lesson_id)?;
        lessons.next()
    }

    /// Lesson immediately before `lesson_id` in the flattened order
    pub fn previous_lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        let mut previous = None;
        for lesson in self.lessons() {
            if lesson.id == lesson_id {
                return previous;
            }
            previous = Some(lesson);
        }
        None
    }

    /// All exercise lessons in global order
    pub fn exercise_lessons(&self) -> Vec<&Lesson> {
        self.lessons().filter(|l| l.is_exercise()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syllabus() -> Syllabus {
        Syllabus::new(
            "Introduction to Programming",
            vec![
                LevelProgression::new(
                    "fundamentals",
                    vec![
                        Lesson::exercise("lesson-a", "Lesson A", "basic-movement"),
                        Lesson::tutorial("lesson-b", "Lesson B", Some("Read me".into())),
                    ],
                ),
                LevelProgression::new("empty", vec![]),
                LevelProgression::new(
                    "variables",
                    vec![Lesson::exercise("lesson-c", "Lesson C", "basic-movement")],
                ),
            ],
        )
    }

    #[test]
    fn test_lessons_for_level() {
        let s = syllabus();
        assert_eq!(s.lessons_for_level("fundamentals").len(), 2);
        assert!(s.lessons_for_level("empty").is_empty());
        assert!(s.lessons_for_level("non-existent").is_empty());
    }

    #[test]
    fn test_lesson_and_level_lookup() {
        let s = syllabus();
        assert_eq!(s.lesson("lesson-c").map(|l| l.title.as_str()), Some("Lesson C"));
        assert!(s.lesson("non-existent-lesson").is_none());
        assert_eq!(s.level_for_lesson("lesson-b"), Some("fundamentals"));
        assert_eq!(s.level_for_lesson("non-existent"), None);
    }

    #[test]
    fn test_navigation_crosses_empty_levels() {
        let s = syllabus();
        assert_eq!(s.next_lesson("lesson-b").map(|l| l.id.as_str()), Some("lesson-c"));
        assert_eq!(s.previous_lesson("lesson-c").map(|l| l.id.as_str()), Some("lesson-b"));
    }

    #[test]
    fn test_navigation_ends() {
        let s = syllabus();
        assert!(s.previous_lesson("lesson-a").is_none());
        assert!(s.next_lesson("lesson-c").is_none());
        assert!(s.next_lesson("non-existent").is_none());
        assert!(s.previous_lesson("non-existent").is_none());
    }

    #[test]
    fn test_exercise_lessons_in_order() {
        let ids: Vec<_> = syllabus().exercise_lessons().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec!["lesson-a", "lesson-c"]);
    }

    #[test]
    fn test_lesson_count() {
        assert_eq!(syllabus().lesson_count(), 3);
    }
}
