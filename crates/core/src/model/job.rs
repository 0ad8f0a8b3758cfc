use std::fmt;

use url::Url;

use crate::model::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Internship,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }

    #[must_use]
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Workplace adjustments an employer commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accommodation {
    SignLanguageInterpreter,
    CaptionedMeetings,
    VisualAlerts,
    WrittenFirstCommunication,
}

impl Accommodation {
    pub const ALL: [Accommodation; 4] = [
        Self::SignLanguageInterpreter,
        Self::CaptionedMeetings,
        Self::VisualAlerts,
        Self::WrittenFirstCommunication,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SignLanguageInterpreter => "Sign language interpreter",
            Self::CaptionedMeetings => "Captioned meetings",
            Self::VisualAlerts => "Visual alerts",
            Self::WrittenFirstCommunication => "Written-first communication",
        }
    }

    #[must_use]
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.label() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    id: JobId,
    title: String,
    company: String,
    location: String,
    kind: JobKind,
    remote: bool,
    accommodations: Vec<Accommodation>,
    apply_url: Url,
}

impl JobListing {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: JobId,
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        kind: JobKind,
        remote: bool,
        accommodations: Vec<Accommodation>,
        apply_url: Url,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            company: company.into(),
            location: location.into(),
            kind,
            remote,
            accommodations,
            apply_url,
        }
    }

    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn kind(&self) -> JobKind {
        self.kind
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote
    }

    #[must_use]
    pub fn accommodations(&self) -> &[Accommodation] {
        &self.accommodations
    }

    #[must_use]
    pub fn apply_url(&self) -> &Url {
        &self.apply_url
    }
}

/// Filters for the job directory. The default query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub text: String,
    pub remote_only: bool,
    pub kind: Option<JobKind>,
    pub accommodation: Option<Accommodation>,
}

impl JobQuery {
    #[must_use]
    pub fn matches(&self, job: &JobListing) -> bool {
        if self.remote_only && !job.remote {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != job.kind) {
            return false;
        }
        if self
            .accommodation
            .is_some_and(|needed| !job.accommodations.contains(&needed))
        {
            return false;
        }

        let needle = self.text.trim().to_lowercase();
        needle.is_empty()
            || [&job.title, &job.company, &job.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(remote: bool, kind: JobKind, accommodations: Vec<Accommodation>) -> JobListing {
        JobListing::new(
            JobId::new(1),
            "Junior Web Developer",
            "Signal Labs",
            "Manchester",
            kind,
            remote,
            accommodations,
            Url::parse("https://jobs.example.org/1").unwrap(),
        )
    }

    #[test]
    fn default_query_matches_everything() {
        assert!(JobQuery::default().matches(&job(false, JobKind::Contract, vec![])));
    }

    #[test]
    fn text_matches_title_company_or_location_case_insensitively() {
        let listing = job(false, JobKind::FullTime, vec![]);
        for text in ["web", "SIGNAL", "manchester"] {
            let query = JobQuery {
                text: text.into(),
                ..JobQuery::default()
            };
            assert!(query.matches(&listing), "{text} should match");
        }
        let query = JobQuery {
            text: "plumber".into(),
            ..JobQuery::default()
        };
        assert!(!query.matches(&listing));
    }

    #[test]
    fn structured_filters_apply() {
        let listing = job(
            false,
            JobKind::PartTime,
            vec![Accommodation::CaptionedMeetings],
        );

        let remote = JobQuery {
            remote_only: true,
            ..JobQuery::default()
        };
        assert!(!remote.matches(&listing));

        let kind = JobQuery {
            kind: Some(JobKind::FullTime),
            ..JobQuery::default()
        };
        assert!(!kind.matches(&listing));

        let captioned = JobQuery {
            accommodation: Some(Accommodation::CaptionedMeetings),
            ..JobQuery::default()
        };
        assert!(captioned.matches(&listing));

        let interpreter = JobQuery {
            accommodation: Some(Accommodation::SignLanguageInterpreter),
            ..JobQuery::default()
        };
        assert!(!interpreter.matches(&listing));
    }

    #[test]
    fn labels_round_trip() {
        for kind in JobKind::ALL {
            assert_eq!(JobKind::from_label(kind.label()), Some(kind));
        }
        for item in Accommodation::ALL {
            assert_eq!(Accommodation::from_label(item.label()), Some(item));
        }
    }
}
