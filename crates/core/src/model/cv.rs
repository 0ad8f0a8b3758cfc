use std::collections::HashSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::contact::{is_plausible_email, normalize_optional};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CvError {
    #[error("full name cannot be empty")]
    EmptyName,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("experience entry {index} needs a role")]
    MissingRole { index: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub employer: String,
    pub period: String,
    pub description: String,
}

impl ExperienceEntry {
    fn is_blank(&self) -> bool {
        [&self.role, &self.employer, &self.period, &self.description]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    fn trimmed(&self) -> Self {
        Self {
            role: self.role.trim().to_owned(),
            employer: self.employer.trim().to_owned(),
            period: self.period.trim().to_owned(),
            description: self.description.trim().to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub qualification: String,
    pub institution: String,
    pub period: String,
}

impl EducationEntry {
    fn is_blank(&self) -> bool {
        [&self.qualification, &self.institution, &self.period]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    fn trimmed(&self) -> Self {
        Self {
            qualification: self.qualification.trim().to_owned(),
            institution: self.institution.trim().to_owned(),
            period: self.period.trim().to_owned(),
        }
    }
}

/// Editable CV form state. Every field is raw user input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvDraft {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl CvDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// Blank entries are dropped and skills are de-duplicated ignoring case,
    /// keeping the first spelling.
    ///
    /// # Errors
    ///
    /// Returns `CvError` if the name is blank, the email is malformed, or a
    /// non-blank experience entry has no role.
    pub fn validate(self) -> Result<Cv, CvError> {
        let full_name = self.full_name.trim().to_owned();
        if full_name.is_empty() {
            return Err(CvError::EmptyName);
        }
        let email = self.email.trim().to_owned();
        if !is_plausible_email(&email) {
            return Err(CvError::InvalidEmail);
        }

        let mut seen = HashSet::new();
        let skills = self
            .skills
            .iter()
            .map(|skill| skill.trim())
            .filter(|skill| !skill.is_empty())
            .filter(|skill| seen.insert(skill.to_lowercase()))
            .map(str::to_owned)
            .collect();

        let mut experience = Vec::with_capacity(self.experience.len());
        for (index, entry) in self.experience.iter().enumerate() {
            if entry.is_blank() {
                continue;
            }
            let entry = entry.trimmed();
            if entry.role.is_empty() {
                return Err(CvError::MissingRole { index });
            }
            experience.push(entry);
        }

        let education = self
            .education
            .iter()
            .filter(|entry| !entry.is_blank())
            .map(EducationEntry::trimmed)
            .collect();

        Ok(Cv {
            full_name,
            email,
            phone: normalize_optional(self.phone),
            headline: normalize_optional(self.headline),
            summary: normalize_optional(self.summary),
            skills,
            experience,
            education,
        })
    }
}

/// A validated CV ready for preview or export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cv {
    full_name: String,
    email: String,
    phone: Option<String>,
    headline: Option<String>,
    summary: Option<String>,
    skills: Vec<String>,
    experience: Vec<ExperienceEntry>,
    education: Vec<EducationEntry>,
}

impl Cv {
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    #[must_use]
    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    #[must_use]
    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    /// Back to an editable draft (used when reopening a saved CV).
    #[must_use]
    pub fn to_draft(&self) -> CvDraft {
        CvDraft {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            headline: self.headline.clone(),
            summary: self.summary.clone(),
            skills: self.skills.clone(),
            experience: self.experience.clone(),
            education: self.education.clone(),
        }
    }

    /// Render the CV as Markdown. Empty sections are omitted.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", self.full_name);
        if let Some(headline) = &self.headline {
            let _ = writeln!(out, "\n_{headline}_");
        }

        let mut contact = vec![self.email.clone()];
        if let Some(phone) = &self.phone {
            contact.push(phone.clone());
        }
        let _ = writeln!(out, "\n{}", contact.join(" | "));

        if let Some(summary) = &self.summary {
            let _ = writeln!(out, "\n## Profile\n\n{summary}");
        }

        if !self.skills.is_empty() {
            let _ = writeln!(out, "\n## Skills\n");
            for skill in &self.skills {
                let _ = writeln!(out, "- {skill}");
            }
        }

        if !self.experience.is_empty() {
            let _ = writeln!(out, "\n## Experience");
            for entry in &self.experience {
                let _ = write!(out, "\n### {}", entry.role);
                if !entry.employer.is_empty() {
                    let _ = write!(out, ", {}", entry.employer);
                }
                out.push('\n');
                if !entry.period.is_empty() {
                    let _ = writeln!(out, "\n{}", entry.period);
                }
                if !entry.description.is_empty() {
                    let _ = writeln!(out, "\n{}", entry.description);
                }
            }
        }

        if !self.education.is_empty() {
            let _ = writeln!(out, "\n## Education\n");
            for entry in &self.education {
                let mut line = format!("- **{}**", entry.qualification);
                if !entry.institution.is_empty() {
                    let _ = write!(line, ", {}", entry.institution);
                }
                if !entry.period.is_empty() {
                    let _ = write!(line, " ({})", entry.period);
                }
                let _ = writeln!(out, "{line}");
            }
        }

        out
    }
}
