use std::sync::Arc;

use signcode_core::model::{TrainingRequest, TrainingRequestDraft};
use tracing::info;

use crate::Clock;
use crate::backend::Backend;
use crate::error::TrainingError;

pub const TRAINING_TABLE: &str = "employer_training_requests";

/// Employer training enquiries, stored as backend rows.
#[derive(Clone)]
pub struct TrainingService {
    clock: Clock,
    backend: Arc<dyn Backend>,
}

impl TrainingService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn Backend>) -> Self {
        Self { clock, backend }
    }

    /// Validate and submit an enquiry.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::Invalid` before contacting the backend if the
    /// draft is rejected, and `TrainingError::Backend` if the insert fails.
    pub async fn submit(
        &self,
        draft: TrainingRequestDraft,
    ) -> Result<TrainingRequest, TrainingError> {
        let request = draft.validate(self.clock.now())?;
        let record = serde_json::to_value(&request)?;
        self.backend.insert_record(TRAINING_TABLE, record).await?;
        info!(
            company_size = %request.company_size(),
            topics = request.training_interest().len(),
            "training request submitted"
        );
        Ok(request)
    }
}
