/// A partner-funded route to premium access, shown beside the paid plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scholarship {
    pub title: &'static str,
    pub description: &'static str,
    pub partner: &'static str,
    pub partner_url: &'static str,
    pub benefits: &'static [&'static str],
    pub eligibility: &'static [&'static str],
    pub availability: &'static str,
}

impl Scholarship {
    #[must_use]
    pub fn power_learn_project() -> Self {
        Self {
            title: "Power Learn Project Scholarship",
            description: "Free access to premium courses for PWDs in partnership with Power Learn Project Africa",
            partner: "Power Learn Project Africa",
            partner_url: "https://powerlearnprojectafrica.org/programs/1-million-devs-for-africa",
            benefits: &[
                "Full premium access for 12 months",
                "Mentorship from industry professionals",
                "Job placement assistance",
                "Certificate of completion",
                "Community support network",
                "Career guidance sessions",
            ],
            eligibility: &[
                "Must be a person with disability",
                "Demonstrate financial need",
                "Commit to completing chosen courses",
                "Available for job placement after completion",
            ],
            availability: "Limited to 100 scholarships per quarter",
        }
    }
}
