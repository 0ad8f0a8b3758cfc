use std::collections::HashMap;

use signcode_core::model::{Course, CourseSlug, Lesson};

use super::SqliteRepository;
use super::mapping::{conn, lesson_id_to_i64, map_course_row, map_lesson_row, ser};
use crate::repository::{CourseRepository, StorageError};

#[async_trait::async_trait]
impl CourseRepository for SqliteRepository {
    async fn upsert_course(&self, course: &Course, position: u32) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO courses (slug, title, summary, premium, position)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(slug) DO UPDATE SET
                title = excluded.title,
                summary = excluded.summary,
                premium = excluded.premium,
                position = excluded.position
            ",
        )
        .bind(course.slug().as_str())
        .bind(course.title())
        .bind(course.summary())
        .bind(i64::from(course.is_premium()))
        .bind(i64::from(position))
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query("DELETE FROM lessons WHERE course_slug = ?1")
            .bind(course.slug().as_str())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (index, lesson) in course.lessons().iter().enumerate() {
            let lesson_position = i64::try_from(index).map_err(ser)?;
            sqlx::query(
                r"
                INSERT INTO lessons (id, course_slug, position, title, duration, media, transcript)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(lesson_id_to_i64(lesson.id())?)
            .bind(course.slug().as_str())
            .bind(lesson_position)
            .bind(lesson.title())
            .bind(lesson.duration())
            .bind(lesson.media())
            .bind(lesson.transcript())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn get_course(&self, slug: &CourseSlug) -> Result<Option<Course>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT slug, title, summary, premium
            FROM courses WHERE slug = ?1
            ",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lesson_rows = sqlx::query(
            r"
            SELECT id, title, duration, media, transcript
            FROM lessons
            WHERE course_slug = ?1
            ORDER BY position ASC
            ",
        )
        .bind(slug.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let lessons = lesson_rows
            .iter()
            .map(map_lesson_row)
            .collect::<Result<Vec<_>, _>>()?;
        map_course_row(&row, lessons).map(Some)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let course_rows = sqlx::query(
            r"
            SELECT slug, title, summary, premium
            FROM courses
            ORDER BY position ASC, slug ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let lesson_rows = sqlx::query(
            r"
            SELECT id, course_slug, title, duration, media, transcript
            FROM lessons
            ORDER BY course_slug ASC, position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut lessons_by_course: HashMap<String, Vec<Lesson>> = HashMap::new();
        for row in &lesson_rows {
            let slug: String = sqlx::Row::try_get(row, "course_slug").map_err(ser)?;
            lessons_by_course
                .entry(slug)
                .or_default()
                .push(map_lesson_row(row)?);
        }

        let mut courses = Vec::with_capacity(course_rows.len());
        for row in &course_rows {
            let slug: String = sqlx::Row::try_get(row, "slug").map_err(ser)?;
            let lessons = lessons_by_course.remove(&slug).unwrap_or_default();
            courses.push(map_course_row(row, lessons)?);
        }
        Ok(courses)
    }
}
