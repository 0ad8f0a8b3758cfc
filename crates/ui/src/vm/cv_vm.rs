use std::collections::{HashMap, HashSet};

use signcode_core::model::{Cv, CvDraft};

/// Which optional text field of the CV form an input edits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CvField {
    FullName,
    Email,
    Phone,
    Headline,
    Summary,
}

/// Write `value` into `field`; blank optional fields become `None`.
pub fn set_cv_field(draft: &mut CvDraft, field: CvField, value: String) {
    let optional = |value: String| (!value.is_empty()).then_some(value);
    match field {
        CvField::FullName => draft.full_name = value,
        CvField::Email => draft.email = value,
        CvField::Phone => draft.phone = optional(value),
        CvField::Headline => draft.headline = optional(value),
        CvField::Summary => draft.summary = optional(value),
    }
}

/// Split the comma separated skills input.
#[must_use]
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_owned)
        .collect()
}

#[must_use]
pub fn skills_text(skills: &[String]) -> String {
    skills.join(", ")
}

/// Preview HTML for a validated CV.
#[must_use]
pub fn cv_preview_html(cv: &Cv) -> String {
    markdown_to_html(&cv.to_markdown())
}

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Keep only the markup a CV preview needs.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "h1", "h2", "h3", "p", "br", "em", "strong", "del", "ul", "ol", "li", "a",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .url_schemes(["https", "mailto"].into_iter().collect())
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcode_core::model::ExperienceEntry;

    #[test]
    fn skills_split_on_commas_and_newlines() {
        assert_eq!(
            parse_skills(" Rust, SQL ,\nBSL level 2,, "),
            vec!["Rust", "SQL", "BSL level 2"]
        );
        assert!(parse_skills("  ").is_empty());
        assert_eq!(skills_text(&parse_skills("a,b")), "a, b");
    }

    #[test]
    fn blank_optional_fields_clear() {
        let mut draft = CvDraft::default();
        set_cv_field(&mut draft, CvField::Phone, "0123".into());
        assert_eq!(draft.phone.as_deref(), Some("0123"));
        set_cv_field(&mut draft, CvField::Phone, String::new());
        assert_eq!(draft.phone, None);
    }

    #[test]
    fn preview_renders_sections() {
        let cv = CvDraft {
            full_name: "Jo Bloggs".into(),
            email: "jo@example.org".into(),
            skills: vec!["SQL".into()],
            experience: vec![ExperienceEntry {
                role: "Data Entry Clerk".into(),
                employer: "Ledger & Co".into(),
                ..ExperienceEntry::default()
            }],
            ..CvDraft::default()
        }
        .validate()
        .unwrap();

        let html = cv_preview_html(&cv);
        assert!(html.contains("<h1>Jo Bloggs</h1>"), "{html}");
        assert!(html.contains("<h2>Skills</h2>"), "{html}");
        assert!(html.contains("<li>SQL</li>"), "{html}");
        assert!(html.contains("Ledger &amp; Co"), "{html}");
    }

    #[test]
    fn markdown_to_html_strips_scripts_and_unsafe_links() {
        let html = markdown_to_html("<script>alert(1)</script>\n\n[x](javascript:alert(1))");
        assert!(!html.contains("<script"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains('x'));
    }
}
