use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use signcode_core::model::{Session, SubscriptionPlan, SubscriptionTier, UserId};
use tracing::{info, warn};

use crate::backend::{AuthToken, Backend};
use crate::error::PaymentError;
use crate::payment::{CURRENCY, Checkout, PaymentDetails, PaymentId, PaymentProvider};

#[derive(Debug, Clone, Copy)]
struct PendingCheckout {
    user: UserId,
    tier: SubscriptionTier,
}

/// Plan listing and the checkout → verify → upgrade flow.
#[derive(Clone)]
pub struct SubscriptionService {
    backend: Arc<dyn Backend>,
    payments: Arc<dyn PaymentProvider>,
    pending: Arc<Mutex<HashMap<PaymentId, PendingCheckout>>>,
}

impl SubscriptionService {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, payments: Arc<dyn PaymentProvider>) -> Self {
        Self {
            backend,
            payments,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn plans(&self) -> [SubscriptionPlan; 3] {
        SubscriptionPlan::catalog()
    }

    /// Create a checkout for upgrading `session` to `tier`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotSignedIn` for anonymous sessions,
    /// `PaymentError::NotPurchasable` for plans without an online price,
    /// `PaymentError::AlreadySubscribed` when the session already has the tier
    /// or a higher one, and provider errors otherwise.
    pub async fn start_checkout(
        &self,
        session: &Session,
        tier: SubscriptionTier,
    ) -> Result<Checkout, PaymentError> {
        let user = session.user_id().ok_or(PaymentError::NotSignedIn)?;
        let plan = SubscriptionPlan::for_tier(tier);
        let amount_cents = plan
            .checkout_price_cents()
            .ok_or(PaymentError::NotPurchasable(tier))?;
        if session.tier() >= tier {
            return Err(PaymentError::AlreadySubscribed(session.tier()));
        }

        let details = PaymentDetails {
            email: session.email().unwrap_or_default().to_owned(),
            tier,
            amount_cents,
            currency: CURRENCY,
        };
        let checkout = self.payments.create_payment(&details).await?;
        self.pending
            .lock()
            .map_err(|e| PaymentError::Provider(e.to_string()))?
            .insert(checkout.payment_id.clone(), PendingCheckout { user, tier });

        info!(payment = %checkout.payment_id, plan = %tier, "checkout started");
        Ok(checkout)
    }

    /// Verify a checkout and record the new tier with the backend.
    ///
    /// Returns the upgraded session.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotVerified` if the payment is unknown, belongs
    /// to another user, or did not complete; `PaymentError::Backend` if the
    /// tier cannot be recorded (the checkout can be confirmed again later).
    pub async fn confirm_checkout(
        &self,
        session: &Session,
        token: &AuthToken,
        payment_id: &PaymentId,
    ) -> Result<Session, PaymentError> {
        let user = session.user_id().ok_or(PaymentError::NotSignedIn)?;
        let pending = {
            let pending = self
                .pending
                .lock()
                .map_err(|e| PaymentError::Provider(e.to_string()))?;
            pending.get(payment_id).copied()
        };
        let Some(pending) = pending.filter(|p| p.user == user) else {
            warn!(payment = %payment_id, "confirm for unknown checkout");
            return Err(PaymentError::NotVerified);
        };

        if !self.payments.verify_payment(payment_id).await? {
            warn!(payment = %payment_id, "payment not verified");
            return Err(PaymentError::NotVerified);
        }
        self.backend.update_tier(token, user, pending.tier).await?;

        self.pending
            .lock()
            .map_err(|e| PaymentError::Provider(e.to_string()))?
            .remove(payment_id);
        info!(payment = %payment_id, plan = %pending.tier, "subscription upgraded");
        Ok(session.with_tier(pending.tier))
    }
}
