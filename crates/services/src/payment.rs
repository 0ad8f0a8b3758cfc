use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use signcode_core::model::SubscriptionTier;
use url::Url;

use crate::backend::random_token;
use crate::error::PaymentError;

pub const CURRENCY: &str = "USD";

/// Identifier assigned to a checkout by the payment provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PaymentId(String);

impl PaymentId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaymentId({})", self.0)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the learner is paying for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub email: String,
    pub tier: SubscriptionTier,
    pub amount_cents: u32,
    pub currency: &'static str,
}

/// A created checkout the learner is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub payment_id: PaymentId,
    pub checkout_url: Url,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `PaymentError` if the provider refuses to create a checkout.
    async fn create_payment(&self, details: &PaymentDetails) -> Result<Checkout, PaymentError>;

    /// Returns whether the payment completed.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the provider cannot be asked.
    async fn verify_payment(&self, id: &PaymentId) -> Result<bool, PaymentError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MockStatus {
    Pending,
    Failed,
}

/// Hands out sandbox checkout URLs and treats every payment it created as paid
/// unless told otherwise.
#[derive(Clone)]
pub struct MockPaymentProvider {
    checkout_base: Url,
    payments: Arc<Mutex<HashMap<PaymentId, MockStatus>>>,
}

impl MockPaymentProvider {
    #[must_use]
    pub fn new(checkout_base: Url) -> Self {
        Self {
            checkout_base,
            payments: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Make a created payment fail verification.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Provider` if the state lock is poisoned.
    pub fn mark_failed(&self, id: &PaymentId) -> Result<(), PaymentError> {
        let mut payments = self
            .payments
            .lock()
            .map_err(|e| PaymentError::Provider(e.to_string()))?;
        if let Some(status) = payments.get_mut(id) {
            *status = MockStatus::Failed;
        }
        Ok(())
    }

    fn checkout_url(&self, id: &PaymentId, details: &PaymentDetails) -> Result<Url, PaymentError> {
        let base = self.checkout_base.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{id}"))?;
        url.query_pairs_mut()
            .append_pair("plan", details.tier.as_str())
            .append_pair("amount", &details.amount_cents.to_string());
        Ok(url)
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment(&self, details: &PaymentDetails) -> Result<Checkout, PaymentError> {
        let payment_id = PaymentId::new(random_token(
            &format!("sub_{}_", details.tier.as_str()),
            12,
        ));
        let checkout_url = self.checkout_url(&payment_id, details)?;
        self.payments
            .lock()
            .map_err(|e| PaymentError::Provider(e.to_string()))?
            .insert(payment_id.clone(), MockStatus::Pending);
        Ok(Checkout {
            payment_id,
            checkout_url,
        })
    }

    async fn verify_payment(&self, id: &PaymentId) -> Result<bool, PaymentError> {
        let payments = self
            .payments
            .lock()
            .map_err(|e| PaymentError::Provider(e.to_string()))?;
        Ok(payments.get(id) == Some(&MockStatus::Pending))
    }
}
