use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson media reference cannot be empty")]
    EmptyMedia,
}

/// A single lesson of a course.
///
/// Lessons are immutable catalog data; completion lives in the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    duration: String,
    media: String,
    transcript: String,
}

impl Lesson {
    /// Creates a lesson.
    ///
    /// `duration` is a display label such as `"12:30"`; `media` is the path or
    /// URL of the signed video asset.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` or `LessonError::EmptyMedia` for
    /// blank values.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        duration: impl Into<String>,
        media: impl Into<String>,
        transcript: impl Into<String>,
    ) -> Result<Self, LessonError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        let media = media.into().trim().to_owned();
        if media.is_empty() {
            return Err(LessonError::EmptyMedia);
        }

        Ok(Self {
            id,
            title,
            duration: duration.into().trim().to_owned(),
            media,
            transcript: transcript.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn media(&self) -> &str {
        &self.media
    }

    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    #[must_use]
    pub fn has_transcript(&self) -> bool {
        !self.transcript.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_rejects_blank_title() {
        let err = Lesson::new(LessonId::new(1), "  ", "5:00", "/v.mp4", "").unwrap_err();
        assert_eq!(err, LessonError::EmptyTitle);
    }

    #[test]
    fn lesson_rejects_blank_media() {
        let err = Lesson::new(LessonId::new(1), "Intro", "5:00", " ", "").unwrap_err();
        assert_eq!(err, LessonError::EmptyMedia);
    }

    #[test]
    fn lesson_trims_fields() {
        let lesson = Lesson::new(
            LessonId::new(7),
            " Intro ",
            " 5:00 ",
            " /videos/intro.mp4 ",
            "  Hello  ",
        )
        .unwrap();
        assert_eq!(lesson.title(), "Intro");
        assert_eq!(lesson.duration(), "5:00");
        assert_eq!(lesson.media(), "/videos/intro.mp4");
        assert_eq!(lesson.transcript(), "Hello");
        assert!(lesson.has_transcript());
    }
}
