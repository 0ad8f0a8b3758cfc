use std::sync::Arc;

use async_trait::async_trait;
use signcode_core::model::{Accommodation, JobId, JobKind, JobListing, JobQuery};
use tracing::debug;
use url::Url;

use crate::error::BackendError;

pub const EXTERNAL_JOB_SEARCH: &str = "https://www.brightermonday.co.ke/jobs";

#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Listings matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if a remote board cannot be queried.
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobListing>, BackendError>;
}

/// A fixed set of listings shipped with the app.
#[derive(Debug, Clone, Default)]
pub struct StaticJobBoard {
    listings: Vec<JobListing>,
}

impl StaticJobBoard {
    #[must_use]
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }

    /// The built-in listings.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if a built-in apply link is malformed.
    pub fn builtin() -> Result<Self, url::ParseError> {
        let listings = BUILTIN
            .iter()
            .map(|row| {
                Ok(JobListing::new(
                    JobId::new(row.id),
                    row.title,
                    row.company,
                    row.location,
                    row.kind,
                    row.remote,
                    row.accommodations.to_vec(),
                    Url::parse(row.apply_url)?,
                ))
            })
            .collect::<Result<Vec<_>, url::ParseError>>()?;
        Ok(Self::new(listings))
    }
}

#[async_trait]
impl JobBoard for StaticJobBoard {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobListing>, BackendError> {
        Ok(self
            .listings
            .iter()
            .filter(|job| query.matches(job))
            .cloned()
            .collect())
    }
}

#[derive(Clone)]
pub struct JobsService {
    board: Arc<dyn JobBoard>,
}

impl JobsService {
    #[must_use]
    pub fn new(board: Arc<dyn JobBoard>) -> Self {
        Self { board }
    }

    /// # Errors
    ///
    /// Returns `BackendError` if the board cannot be queried.
    pub async fn search(&self, query: &JobQuery) -> Result<Vec<JobListing>, BackendError> {
        let jobs = self.board.search(query).await?;
        debug!(results = jobs.len(), "job search");
        Ok(jobs)
    }

    /// Link to the wider external job search, pre-filled with `text`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the search base is malformed.
    pub fn external_search_url(&self, text: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(EXTERNAL_JOB_SEARCH)?;
        let text = text.trim();
        if !text.is_empty() {
            url.query_pairs_mut().append_pair("q", text);
        }
        Ok(url)
    }
}

//
// ─── BUILT-IN DATA ─────────────────────────────────────────────────────────────
//

struct JobRow {
    id: u64,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    kind: JobKind,
    remote: bool,
    accommodations: &'static [Accommodation],
    apply_url: &'static str,
}

const BUILTIN: &[JobRow] = &[
    JobRow {
        id: 1,
        title: "Junior Web Developer",
        company: "Signal Labs",
        location: "Remote",
        kind: JobKind::FullTime,
        remote: true,
        accommodations: &[
            Accommodation::WrittenFirstCommunication,
            Accommodation::CaptionedMeetings,
        ],
        apply_url: "https://jobs.example.org/signal-labs/junior-web-developer",
    },
    JobRow {
        id: 2,
        title: "Entry-Level Graphic Designer",
        company: "Bright Pixel Studio",
        location: "Nairobi",
        kind: JobKind::FullTime,
        remote: false,
        accommodations: &[
            Accommodation::SignLanguageInterpreter,
            Accommodation::VisualAlerts,
        ],
        apply_url: "https://jobs.example.org/bright-pixel/graphic-designer",
    },
    JobRow {
        id: 3,
        title: "Customer Support Agent (Chat)",
        company: "HelpDesk Direct",
        location: "Remote",
        kind: JobKind::PartTime,
        remote: true,
        accommodations: &[Accommodation::WrittenFirstCommunication],
        apply_url: "https://jobs.example.org/helpdesk-direct/chat-support",
    },
    JobRow {
        id: 4,
        title: "Data Entry Clerk",
        company: "Ledger & Co",
        location: "Manchester",
        kind: JobKind::Contract,
        remote: false,
        accommodations: &[Accommodation::VisualAlerts],
        apply_url: "https://jobs.example.org/ledger-co/data-entry",
    },
    JobRow {
        id: 5,
        title: "QA Testing Intern",
        company: "Open Access Software",
        location: "Remote",
        kind: JobKind::Internship,
        remote: true,
        accommodations: &[
            Accommodation::SignLanguageInterpreter,
            Accommodation::CaptionedMeetings,
            Accommodation::WrittenFirstCommunication,
        ],
        apply_url: "https://jobs.example.org/open-access/qa-intern",
    },
];
