//! Lesson playback and progress for a single course.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::{Course, Lesson, LessonId};

/// Playback state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No course loaded.
    #[default]
    Idle,
    /// Course loaded, nothing played since the last load.
    Ready,
    Playing,
    Paused,
}

/// Completed-lesson count for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    completed: usize,
    total: usize,
}

impl Progress {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed: completed.min(total),
            total,
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage in `[0, 100]`; `0` for a course without lessons.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 * 100.0 / self.total as f64
    }

    /// Percentage rounded down to a whole number, as shown in the progress bar.
    #[must_use]
    pub fn percent_floor(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        u8::try_from(self.completed * 100 / self.total).unwrap_or(100)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Drives lesson navigation, playback flags and completion for one course.
///
/// The player never mutates the course; completion is tracked in its own
/// set and only grows until the next [`LessonPlayer::load_course`].
#[derive(Debug, Clone, Default)]
pub struct LessonPlayer {
    course: Option<Arc<Course>>,
    index: usize,
    state: PlaybackState,
    muted: bool,
    transcript_visible: bool,
    completed: BTreeSet<LessonId>,
}

impl LessonPlayer {
    /// An idle player with no course loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a course and move to `Ready` at the first lesson.
    ///
    /// Any previous course, completion and control flags are discarded.
    pub fn load_course(&mut self, course: Arc<Course>) {
        self.course = Some(course);
        self.index = 0;
        self.state = PlaybackState::Ready;
        self.muted = false;
        self.transcript_visible = false;
        self.completed.clear();
    }

    /// Drop the loaded course and return to `Idle`.
    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn play(&mut self) {
        if self.current_lesson().is_none() {
            return;
        }
        if matches!(self.state, PlaybackState::Ready | PlaybackState::Paused) {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance to the next lesson; a no-op on the last one.
    pub fn next(&mut self) {
        if self.index < self.last_index() {
            self.switch_to(self.index + 1);
        }
    }

    /// Go back one lesson; a no-op on the first one.
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.switch_to(self.index - 1);
        }
    }

    /// Jump to a lesson by position. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index != self.index && index < self.lesson_count() {
            self.switch_to(index);
        }
    }

    /// Mark the current lesson as completed.
    ///
    /// Returns `true` if the lesson was not already completed.
    pub fn mark_complete(&mut self) -> bool {
        let Some(id) = self.current_lesson().map(Lesson::id) else {
            return false;
        };
        self.completed.insert(id)
    }

    pub fn toggle_mute(&mut self) {
        if self.course.is_some() {
            self.muted = !self.muted;
        }
    }

    pub fn toggle_transcript(&mut self) {
        if self.course.is_some() {
            self.transcript_visible = !self.transcript_visible;
        }
    }

    // Queries
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn course(&self) -> Option<&Arc<Course>> {
        self.course.as_ref()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.course.as_ref().and_then(|course| course.lesson(self.index))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index < self.last_index()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn transcript_visible(&self) -> bool {
        self.transcript_visible
    }

    #[must_use]
    pub fn is_completed(&self, id: LessonId) -> bool {
        self.completed.contains(&id)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.completed.len(), self.lesson_count())
    }

    fn lesson_count(&self) -> usize {
        self.course.as_ref().map_or(0, |course| course.lesson_count())
    }

    fn last_index(&self) -> usize {
        self.lesson_count().saturating_sub(1)
    }

    fn switch_to(&mut self, index: usize) {
        self.index = index;
        self.pause();
    }
}
