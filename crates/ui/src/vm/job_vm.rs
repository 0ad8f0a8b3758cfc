use signcode_core::model::{Accommodation, JobKind, JobListing};

/// UI-ready representation of a job listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobCardVm {
    pub id: u64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub kind_label: &'static str,
    pub remote: bool,
    pub accommodations: Vec<&'static str>,
    pub apply_url: String,
}

#[must_use]
pub fn map_job_cards(jobs: &[JobListing]) -> Vec<JobCardVm> {
    jobs.iter()
        .map(|job| JobCardVm {
            id: job.id().value(),
            title: job.title().to_owned(),
            company: job.company().to_owned(),
            location: job.location().to_owned(),
            kind_label: job.kind().label(),
            remote: job.is_remote(),
            accommodations: job
                .accommodations()
                .iter()
                .map(|item| item.label())
                .collect(),
            apply_url: job.apply_url().to_string(),
        })
        .collect()
}

/// Select value for a kind filter; the empty string means any kind.
#[must_use]
pub fn kind_from_select(value: &str) -> Option<JobKind> {
    JobKind::from_label(value)
}

#[must_use]
pub fn accommodation_from_select(value: &str) -> Option<Accommodation> {
    Accommodation::from_label(value)
}

#[must_use]
pub fn results_label(count: usize) -> String {
    match count {
        0 => "No jobs match these filters.".to_owned(),
        1 => "1 job".to_owned(),
        n => format!("{n} jobs"),
    }
}
