use std::sync::Arc;

use signcode_core::model::{Cv, CvDraft, Session};
use storage::repository::{CvRepository, StoredCv};
use tracing::debug;

use crate::Clock;
use crate::error::CvServiceError;

/// Owner key used for CVs written without a signed-in user.
pub const LOCAL_OWNER: &str = "local";

#[derive(Clone)]
pub struct CvService {
    clock: Clock,
    cvs: Arc<dyn CvRepository>,
}

impl CvService {
    #[must_use]
    pub fn new(clock: Clock, cvs: Arc<dyn CvRepository>) -> Self {
        Self { clock, cvs }
    }

    /// Storage key for the CV of `session`.
    #[must_use]
    pub fn owner_for(session: &Session) -> String {
        session
            .user_id()
            .map_or_else(|| LOCAL_OWNER.to_owned(), |id| id.to_string())
    }

    /// Validate and persist a draft, returning the normalized CV.
    ///
    /// # Errors
    ///
    /// Returns `CvServiceError::Invalid` if validation fails, and
    /// `CvServiceError::Storage` if it cannot be saved.
    pub async fn save_draft(&self, owner: &str, draft: CvDraft) -> Result<Cv, CvServiceError> {
        let cv = draft.validate()?;
        self.cvs.save_cv(owner, &cv, self.clock.now()).await?;
        debug!(owner, "cv saved");
        Ok(cv)
    }

    /// # Errors
    ///
    /// Returns `CvServiceError::Storage` if the CV cannot be read.
    pub async fn load(&self, owner: &str) -> Result<Option<StoredCv>, CvServiceError> {
        Ok(self.cvs.load_cv(owner).await?)
    }
}
