use signcode_core::model::{Session, SubscriptionPlan, SubscriptionTier};

/// What the subscribe page offers for a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanAction {
    /// The session already has exactly this plan.
    Current,
    /// Covered by a higher plan the session has.
    Included,
    Upgrade,
    SignInFirst,
    ContactSales,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanCardVm {
    pub tier: SubscriptionTier,
    pub name: &'static str,
    pub summary: &'static str,
    pub price_label: String,
    pub features: &'static [&'static str],
    pub action: PlanAction,
}

#[must_use]
pub fn map_plan_cards(plans: &[SubscriptionPlan], session: &Session) -> Vec<PlanCardVm> {
    plans
        .iter()
        .map(|plan| PlanCardVm {
            tier: plan.tier(),
            name: plan.name(),
            summary: plan.summary(),
            price_label: plan.price_label(),
            features: plan.features(),
            action: plan_action(plan, session),
        })
        .collect()
}

fn plan_action(plan: &SubscriptionPlan, session: &Session) -> PlanAction {
    let tier = plan.tier();
    if session.tier() == tier {
        PlanAction::Current
    } else if session.tier() > tier {
        PlanAction::Included
    } else if !plan.is_purchasable() {
        PlanAction::ContactSales
    } else if session.is_anonymous() {
        PlanAction::SignInFirst
    } else {
        PlanAction::Upgrade
    }
}
