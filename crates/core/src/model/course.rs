use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CourseSlug, Lesson, LessonId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("lesson {0} appears more than once")]
    DuplicateLesson(LessonId),
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A course and its ordered lessons.
///
/// Course data is shared read-only between the catalog and players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    slug: CourseSlug,
    title: String,
    summary: String,
    premium: bool,
    lessons: Vec<Lesson>,
}

impl Course {
    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` for a blank title and
    /// `CourseError::DuplicateLesson` if two lessons share an id.
    pub fn new(
        slug: CourseSlug,
        title: impl Into<String>,
        summary: impl Into<String>,
        premium: bool,
        lessons: Vec<Lesson>,
    ) -> Result<Self, CourseError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        let mut seen = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !seen.insert(lesson.id()) {
                return Err(CourseError::DuplicateLesson(lesson.id()));
            }
        }

        Ok(Self {
            slug,
            title,
            summary: summary.into().trim().to_owned(),
            premium,
            lessons,
        })
    }

    // Accessors
    #[must_use]
    pub fn slug(&self) -> &CourseSlug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.premium
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn lesson(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    #[must_use]
    pub fn contains_lesson(&self, id: LessonId) -> bool {
        self.lessons.iter().any(|lesson| lesson.id() == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
