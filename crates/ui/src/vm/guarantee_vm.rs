use signcode_core::model::{
    GuaranteeRequestDraft, RefundReason, Session, SubscriptionPlan, SubscriptionTier,
};

/// Paid plans offered in the guarantee form's plan select.
pub const REFUNDABLE_PLANS: [SubscriptionTier; 2] =
    [SubscriptionTier::Premium, SubscriptionTier::Enterprise];

/// State of the money-back guarantee form. Selects hold their option values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuaranteeForm {
    pub name: String,
    pub email: String,
    pub subscription_type: String,
    pub reason: String,
    pub additional_info: String,
}

impl GuaranteeForm {
    /// Start from what the session already knows about the subscriber.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        let tier = session.tier();
        Self {
            email: session.email().unwrap_or_default().to_owned(),
            subscription_type: if tier.is_paid() {
                tier.as_str().to_owned()
            } else {
                String::new()
            },
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns a user-facing message when a select holds a value that is not
    /// one of its options. Empty selects are left to
    /// `GuaranteeRequestDraft::validate`.
    pub fn to_draft(&self) -> Result<GuaranteeRequestDraft, String> {
        let plan = self.subscription_type.trim();
        let subscription_type = if plan.is_empty() {
            None
        } else {
            Some(plan.parse::<SubscriptionTier>().map_err(|err| err.to_string())?)
        };

        let reason = self.reason.trim();
        let reason = if reason.is_empty() {
            None
        } else {
            Some(
                RefundReason::from_value(reason)
                    .ok_or_else(|| format!("unknown reason: {reason}"))?,
            )
        };

        let info = self.additional_info.trim();
        Ok(GuaranteeRequestDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            subscription_type,
            reason,
            additional_info: (!info.is_empty()).then(|| info.to_owned()),
        })
    }
}

#[must_use]
pub fn plan_option_label(tier: SubscriptionTier) -> String {
    let plan = SubscriptionPlan::for_tier(tier);
    format!("{} Plan ({})", plan.name(), plan.price_label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcode_core::model::UserId;

    #[test]
    fn prefills_paid_subscribers() {
        let session = Session::signed_in(
            UserId::random(),
            Some("ada@example.org".into()),
            SubscriptionTier::Premium,
        );
        let form = GuaranteeForm::for_session(&session);
        assert_eq!(form.email, "ada@example.org");
        assert_eq!(form.subscription_type, "premium");

        let form = GuaranteeForm::for_session(&Session::anonymous());
        assert_eq!(form, GuaranteeForm::default());
    }

    #[test]
    fn converts_select_values() {
        let form = GuaranteeForm {
            name: "Ada".into(),
            email: "ada@example.org".into(),
            subscription_type: "enterprise".into(),
            reason: "financial_hardship".into(),
            additional_info: "   ".into(),
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.subscription_type, Some(SubscriptionTier::Enterprise));
        assert_eq!(draft.reason, Some(RefundReason::FinancialHardship));
        assert_eq!(draft.additional_info, None);

        let blank = GuaranteeForm::default().to_draft().unwrap();
        assert_eq!(blank.subscription_type, None);
        assert_eq!(blank.reason, None);
    }

    #[test]
    fn rejects_unknown_select_values() {
        let form = GuaranteeForm {
            reason: "bored".into(),
            ..GuaranteeForm::default()
        };
        assert!(form.to_draft().unwrap_err().contains("reason"));
    }

    #[test]
    fn plan_options_show_listed_prices() {
        assert_eq!(
            plan_option_label(SubscriptionTier::Premium),
            "Premium Plan ($5/month)"
        );
        assert_eq!(
            plan_option_label(SubscriptionTier::Enterprise),
            "Enterprise Plan ($99/month)"
        );
    }
}
