use std::sync::Arc;

use signcode_core::model::{GuaranteeRequest, GuaranteeRequestDraft};
use tracing::info;

use crate::Clock;
use crate::backend::Backend;
use crate::error::GuaranteeError;

pub const GUARANTEE_TABLE: &str = "guarantee_requests";

/// Money-back guarantee requests, reviewed by the support team.
#[derive(Clone)]
pub struct GuaranteeService {
    clock: Clock,
    backend: Arc<dyn Backend>,
}

impl GuaranteeService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn Backend>) -> Self {
        Self { clock, backend }
    }

    /// Validate and record a refund request.
    ///
    /// # Errors
    ///
    /// Returns `GuaranteeError::Invalid` without contacting the backend when
    /// the draft is rejected, and `GuaranteeError::Backend` if the insert
    /// fails.
    pub async fn submit(
        &self,
        draft: GuaranteeRequestDraft,
    ) -> Result<GuaranteeRequest, GuaranteeError> {
        let request = draft.validate(self.clock.now())?;
        let record = serde_json::to_value(&request)?;
        self.backend.insert_record(GUARANTEE_TABLE, record).await?;
        info!(
            plan = %request.subscription_type(),
            reason = %request.reason(),
            "guarantee request submitted"
        );
        Ok(request)
    }
}
