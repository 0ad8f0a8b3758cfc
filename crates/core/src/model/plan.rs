use crate::model::SubscriptionTier;

/// A subscription offering shown on the subscribe page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionPlan {
    tier: SubscriptionTier,
    name: &'static str,
    summary: &'static str,
    /// Listed price in US cents.
    monthly_price_cents: u32,
    /// Whether the plan can be bought through online checkout.
    self_serve: bool,
    features: &'static [&'static str],
}

const FREE_FEATURES: &[&str] = &[
    "All free courses with BSL video and captions",
    "CV builder",
    "Job directory",
];

const PREMIUM_FEATURES: &[&str] = &[
    "Everything in Free",
    "All premium courses",
    "Downloadable transcripts",
    "Certificates of completion",
];

const ENTERPRISE_FEATURES: &[&str] = &[
    "Everything in Premium",
    "Up to 50 learner accounts",
    "Deaf awareness training for employers",
    "Dedicated success manager",
];

impl SubscriptionPlan {
    /// The plans offered by the platform, cheapest first.
    #[must_use]
    pub fn catalog() -> [SubscriptionPlan; 3] {
        [
            SubscriptionPlan {
                tier: SubscriptionTier::Free,
                name: "Free",
                summary: "Perfect for getting started with basic digital skills",
                monthly_price_cents: 0,
                self_serve: false,
                features: FREE_FEATURES,
            },
            SubscriptionPlan {
                tier: SubscriptionTier::Premium,
                name: "Premium",
                summary: "Full access to all courses and advanced features",
                monthly_price_cents: 500,
                self_serve: true,
                features: PREMIUM_FEATURES,
            },
            SubscriptionPlan {
                tier: SubscriptionTier::Enterprise,
                name: "Enterprise",
                summary: "For organizations training multiple learners",
                monthly_price_cents: 9_900,
                self_serve: false,
                features: ENTERPRISE_FEATURES,
            },
        ]
    }

    #[must_use]
    pub fn for_tier(tier: SubscriptionTier) -> SubscriptionPlan {
        let [free, premium, enterprise] = Self::catalog();
        match tier {
            SubscriptionTier::Free => free,
            SubscriptionTier::Premium => premium,
            SubscriptionTier::Enterprise => enterprise,
        }
    }

    #[must_use]
    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    #[must_use]
    pub fn monthly_price_cents(&self) -> u32 {
        self.monthly_price_cents
    }

    /// Amount charged at checkout, or `None` when the plan is sold by the
    /// sales team or costs nothing.
    #[must_use]
    pub fn checkout_price_cents(&self) -> Option<u32> {
        self.is_purchasable().then_some(self.monthly_price_cents)
    }

    #[must_use]
    pub fn features(&self) -> &'static [&'static str] {
        self.features
    }

    /// True when the plan can be bought through self-serve checkout.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.self_serve && self.monthly_price_cents > 0
    }

    #[must_use]
    pub fn price_label(&self) -> String {
        let cents = self.monthly_price_cents;
        match (cents / 100, cents % 100) {
            (0, 0) => "Free".to_string(),
            (dollars, 0) => format!("${dollars}/month"),
            (dollars, rest) => format!("${dollars}.{rest:02}/month"),
        }
    }
}
