use signcode_core::model::{Course, CourseSlug, Lesson, LessonId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn lesson_id_from_i64(v: i64) -> Result<LessonId, StorageError> {
    u64::try_from(v)
        .map(LessonId::new)
        .map_err(|_| StorageError::Serialization("lesson_id sign overflow".into()))
}

pub(crate) fn lesson_id_to_i64(id: LessonId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("lesson_id overflow".into()))
}

pub(crate) fn map_lesson_row(row: &SqliteRow) -> Result<Lesson, StorageError> {
    let id = lesson_id_from_i64(row.try_get("id").map_err(ser)?)?;
    let title: String = row.try_get("title").map_err(ser)?;
    let duration: String = row.try_get("duration").map_err(ser)?;
    let media: String = row.try_get("media").map_err(ser)?;
    let transcript: String = row.try_get("transcript").map_err(ser)?;
    Lesson::new(id, title, duration, media, transcript).map_err(ser)
}

/// Rebuild a course from its row and its already ordered lessons.
pub(crate) fn map_course_row(row: &SqliteRow, lessons: Vec<Lesson>) -> Result<Course, StorageError> {
    let slug: String = row.try_get("slug").map_err(ser)?;
    let slug = CourseSlug::new(slug).map_err(ser)?;
    let title: String = row.try_get("title").map_err(ser)?;
    let summary: String = row.try_get("summary").map_err(ser)?;
    let premium: i64 = row.try_get("premium").map_err(ser)?;
    Course::new(slug, title, summary, premium != 0, lessons).map_err(ser)
}
