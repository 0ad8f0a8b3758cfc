use async_trait::async_trait;
use chrono::{DateTime, Utc};
use signcode_core::model::{Course, CourseSlug, Cv, CvDraft};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A saved CV and when it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCv {
    pub cv: Cv,
    pub updated_at: DateTime<Utc>,
}

/// Encode a CV for persistence. The stored form is the draft shape so that
/// loading always goes back through validation.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_cv(cv: &Cv) -> Result<String, StorageError> {
    serde_json::to_string(&cv.to_draft()).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the body is not a valid CV.
pub fn decode_cv(body: &str) -> Result<Cv, StorageError> {
    let draft: CvDraft =
        serde_json::from_str(body).map_err(|e| StorageError::Serialization(e.to_string()))?;
    draft
        .validate()
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist or replace a course and its lessons.
    ///
    /// `position` orders the course within listings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn upsert_course(&self, course: &Course, position: u32) -> Result<(), StorageError>;

    /// Fetch a course by slug.
    ///
    /// Returns `Ok(None)` when no such course exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_course(&self, slug: &CourseSlug) -> Result<Option<Course>, StorageError>;

    /// List all courses ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;
}

#[async_trait]
pub trait CvRepository: Send + Sync {
    /// Save the CV for `owner`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the CV cannot be stored.
    async fn save_cv(
        &self,
        owner: &str,
        cv: &Cv,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Load the CV for `owner`, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures or corrupt data.
    async fn load_cv(&self, owner: &str) -> Result<Option<StoredCv>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<HashMap<CourseSlug, (u32, Course)>>>,
    cvs: Arc<Mutex<HashMap<String, (String, DateTime<Utc>)>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn upsert_course(&self, course: &Course, position: u32) -> Result<(), StorageError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(course.slug().clone(), (position, course.clone()));
        Ok(())
    }

    async fn get_course(&self, slug: &CourseSlug) -> Result<Option<Course>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(slug).map(|(_, course)| course.clone()))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<&(u32, Course)> = guard.values().collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.slug().cmp(b.1.slug())));
        Ok(rows.into_iter().map(|(_, course)| course.clone()).collect())
    }
}

#[async_trait]
impl CvRepository for InMemoryRepository {
    async fn save_cv(
        &self,
        owner: &str,
        cv: &Cv,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let body = encode_cv(cv)?;
        let mut guard = self
            .cvs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(owner.to_owned(), (body, updated_at));
        Ok(())
    }

    async fn load_cv(&self, owner: &str) -> Result<Option<StoredCv>, StorageError> {
        let guard = self
            .cvs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(owner)
            .map(|(body, updated_at)| {
                Ok(StoredCv {
                    cv: decode_cv(body)?,
                    updated_at: *updated_at,
                })
            })
            .transpose()
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub cvs: Arc<dyn CvRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let cvs: Arc<dyn CvRepository> = Arc::new(repo);
        Self { courses, cvs }
    }
}
