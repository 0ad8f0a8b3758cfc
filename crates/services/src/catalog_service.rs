use std::sync::Arc;

use signcode_core::model::{Course, CourseSlug, Session};
use signcode_core::{AccessGuard, AccessPolicy, Catalog, CourseFilter, LessonPlayer};
use storage::repository::CourseRepository;
use tracing::debug;

use crate::error::{CatalogServiceError, CourseAccessError};

/// Course listing and gated playback over the stored catalog.
#[derive(Clone)]
pub struct CatalogService {
    courses: Arc<dyn CourseRepository>,
    policy: AccessPolicy,
}

impl CatalogService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>, policy: AccessPolicy) -> Self {
        Self { courses, policy }
    }

    #[must_use]
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Upsert every course of `catalog`, keeping its order.
    ///
    /// Running it again with the same catalog leaves storage unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if a course cannot be stored.
    pub async fn seed(&self, catalog: &Catalog) -> Result<usize, CatalogServiceError> {
        for (position, course) in catalog.courses().iter().enumerate() {
            let position = u32::try_from(position).unwrap_or(u32::MAX);
            self.courses.upsert_course(course, position).await?;
        }
        Ok(catalog.len())
    }

    /// Rebuild the catalog from storage.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` if storage fails or holds an invalid catalog.
    pub async fn load_catalog(&self) -> Result<Catalog, CatalogServiceError> {
        let courses = self.courses.list_courses().await?;
        Ok(Catalog::new(courses)?)
    }

    /// Courses matching `filter`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` if the catalog cannot be loaded.
    pub async fn list_courses(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<Arc<Course>>, CatalogServiceError> {
        Ok(self.load_catalog().await?.filter(filter))
    }

    /// Fetch one course without any access check.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn find_course(
        &self,
        slug: &CourseSlug,
    ) -> Result<Option<Arc<Course>>, CatalogServiceError> {
        Ok(self.courses.get_course(slug).await?.map(Arc::new))
    }

    /// Open a player for `slug` if `session` may play it.
    ///
    /// # Errors
    ///
    /// Returns `CourseAccessError::NotFound` for an unknown slug,
    /// `CourseAccessError::Denied` when the tier is insufficient, and
    /// `CourseAccessError::Storage` if repository access fails.
    pub async fn open_course(
        &self,
        slug: &CourseSlug,
        session: &Session,
    ) -> Result<LessonPlayer, CourseAccessError> {
        let course = self
            .courses
            .get_course(slug)
            .await?
            .ok_or_else(|| CourseAccessError::NotFound { slug: slug.clone() })?;

        let guard = AccessGuard::new(session.clone(), self.policy);
        let allowed = guard.allows(&course);
        debug!(
            course = %slug,
            tier = %session.tier(),
            policy = %self.policy,
            allowed,
            "course access decision"
        );
        Ok(guard.open_player(Arc::new(course))?)
    }
}
