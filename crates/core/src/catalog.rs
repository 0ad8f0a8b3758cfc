//! The course catalog shipped with the application.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{Course, CourseError, CourseSlug, Lesson, LessonError, LessonId, SlugError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("course slug {0} appears more than once")]
    DuplicateSlug(CourseSlug),
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
}

/// Which courses a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessFilter {
    #[default]
    All,
    Free,
    Premium,
}

impl AccessFilter {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Free => "Free",
            Self::Premium => "Premium",
        }
    }

    #[must_use]
    pub fn from_label(value: &str) -> Self {
        match value {
            "Free" => Self::Free,
            "Premium" => Self::Premium,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseFilter {
    pub query: String,
    pub access: AccessFilter,
}

impl CourseFilter {
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let access_ok = match self.access {
            AccessFilter::All => true,
            AccessFilter::Free => !course.is_premium(),
            AccessFilter::Premium => course.is_premium(),
        };
        if !access_ok {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || course.title().to_lowercase().contains(&needle)
            || course.summary().to_lowercase().contains(&needle)
    }
}

/// An ordered, slug-unique set of courses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Arc<Course>>,
}

impl Catalog {
    /// Build a catalog preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSlug` if two courses share a slug.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(course.slug().clone()) {
                return Err(CatalogError::DuplicateSlug(course.slug().clone()));
            }
        }
        Ok(Self {
            courses: courses.into_iter().map(Arc::new).collect(),
        })
    }

    /// The built-in course list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the built-in data fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut courses = Vec::with_capacity(BUILTIN.len());
        for spec in BUILTIN {
            let lessons = spec
                .lessons
                .iter()
                .map(|(id, title, duration, media, transcript)| {
                    Lesson::new(LessonId::new(*id), *title, *duration, *media, *transcript)
                })
                .collect::<Result<Vec<_>, _>>()?;
            courses.push(Course::new(
                CourseSlug::new(spec.slug)?,
                spec.title,
                spec.summary,
                spec.premium,
                lessons,
            )?);
        }
        Self::new(courses)
    }

    #[must_use]
    pub fn courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    #[must_use]
    pub fn find(&self, slug: &CourseSlug) -> Option<Arc<Course>> {
        self.courses
            .iter()
            .find(|course| course.slug() == slug)
            .map(Arc::clone)
    }

    #[must_use]
    pub fn filter(&self, filter: &CourseFilter) -> Vec<Arc<Course>> {
        self.courses
            .iter()
            .filter(|course| filter.matches(course))
            .map(Arc::clone)
            .collect()
    }
}

//
// ─── BUILT-IN DATA ─────────────────────────────────────────────────────────────
//

type LessonRow = (u64, &'static str, &'static str, &'static str, &'static str);

struct CourseSpec {
    slug: &'static str,
    title: &'static str,
    summary: &'static str,
    premium: bool,
    lessons: &'static [LessonRow],
}

const BUILTIN: &[CourseSpec] = &[
    CourseSpec {
        slug: "digital-literacy-101",
        title: "Digital Literacy 101",
        summary: "Get confident with computers, the web and staying safe online.",
        premium: false,
        lessons: &[
            (
                101,
                "Getting Started with Computers",
                "8:45",
                "/videos/digital-literacy/01-getting-started.mp4",
                "Welcome! In this lesson we explore the parts of a computer and how to switch it on safely.",
            ),
            (
                102,
                "Browsing the Web",
                "10:20",
                "/videos/digital-literacy/02-browsing.mp4",
                "A web browser opens websites. We practise using the address bar, tabs and bookmarks.",
            ),
            (
                103,
                "Staying Safe Online",
                "12:05",
                "/videos/digital-literacy/03-safety.mp4",
                "Strong passwords, spotting scams and keeping your personal details private.",
            ),
        ],
    },
    CourseSpec {
        slug: "web-development-basics",
        title: "Web Development Basics",
        summary: "Build your first accessible web page with HTML and CSS.",
        premium: false,
        lessons: &[
            (
                201,
                "How the Web Works",
                "9:30",
                "/videos/web-basics/01-how-the-web-works.mp4",
                "Browsers ask servers for pages. We follow one request from start to finish.",
            ),
            (
                202,
                "HTML Structure",
                "14:10",
                "/videos/web-basics/02-html.mp4",
                "Headings, paragraphs, links and images: the building blocks of every page.",
            ),
            (
                203,
                "Styling with CSS",
                "15:00",
                "/videos/web-basics/03-css.mp4",
                "Selectors, colours and layout. We also check colour contrast for readability.",
            ),
            (
                204,
                "Accessible Pages",
                "11:40",
                "/videos/web-basics/04-accessibility.mp4",
                "Captions, alt text and keyboard navigation so everyone can use your site.",
            ),
        ],
    },
    CourseSpec {
        slug: "intro-to-python",
        title: "Introduction to Python",
        summary: "Your first steps in programming with Python.",
        premium: false,
        lessons: &[
            (
                301,
                "Hello, Python",
                "7:50",
                "/videos/python-intro/01-hello.mp4",
                "We install Python and print our first message.",
            ),
            (
                302,
                "Variables and Types",
                "12:30",
                "/videos/python-intro/02-variables.mp4",
                "Numbers, text and true/false values, and how to store them in variables.",
            ),
            (
                303,
                "Making Decisions",
                "13:15",
                "/videos/python-intro/03-if.mp4",
                "Using if, elif and else to choose what the program does.",
            ),
        ],
    },
    CourseSpec {
        slug: "advanced-python",
        title: "Advanced Python",
        summary: "Functions, classes, files and testing for working developers.",
        premium: true,
        lessons: &[
            (
                401,
                "Functions in Depth",
                "16:20",
                "/videos/python-advanced/01-functions.mp4",
                "Default arguments, keyword arguments and returning several values.",
            ),
            (
                402,
                "Classes and Objects",
                "18:45",
                "/videos/python-advanced/02-classes.mp4",
                "Modelling real things with classes, methods and inheritance.",
            ),
            (
                403,
                "Working with Files",
                "14:05",
                "/videos/python-advanced/03-files.mp4",
                "Reading and writing text and CSV files safely.",
            ),
            (
                404,
                "Testing Your Code",
                "17:30",
                "/videos/python-advanced/04-testing.mp4",
                "Writing automated tests so changes do not break your program.",
            ),
        ],
    },
    CourseSpec {
        slug: "data-analysis-with-sql",
        title: "Data Analysis with SQL",
        summary: "Query, filter and summarise data with SQL.",
        premium: true,
        lessons: &[
            (
                501,
                "Tables and Queries",
                "11:00",
                "/videos/sql/01-select.mp4",
                "Rows, columns and the SELECT statement.",
            ),
            (
                502,
                "Filtering and Sorting",
                "12:40",
                "/videos/sql/02-where.mp4",
                "WHERE clauses and ORDER BY to find exactly what you need.",
            ),
            (
                503,
                "Grouping and Summaries",
                "15:25",
                "/videos/sql/03-group-by.mp4",
                "COUNT, SUM and GROUP BY for quick reports.",
            ),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(raw: &str) -> CourseSlug {
        CourseSlug::new(raw).unwrap()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 5);

        let literacy = catalog.find(&slug("digital-literacy-101")).unwrap();
        assert_eq!(literacy.lesson_count(), 3);
        assert!(!literacy.is_premium());

        let python = catalog.find(&slug("advanced-python")).unwrap();
        assert!(python.is_premium());
    }

    #[test]
    fn find_unknown_slug_is_none() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.find(&slug("quantum-knitting")).is_none());
    }

    #[test]
    fn new_rejects_duplicate_slugs() {
        let course = Course::new(slug("a"), "A", "", false, vec![]).unwrap();
        let err = Catalog::new(vec![course.clone(), course]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSlug(slug("a")));
    }

    #[test]
    fn filter_by_access_and_query() {
        let catalog = Catalog::builtin().unwrap();

        let premium = catalog.filter(&CourseFilter {
            access: AccessFilter::Premium,
            ..CourseFilter::default()
        });
        assert!(premium.iter().all(|course| course.is_premium()));
        assert_eq!(premium.len(), 2);

        let python = catalog.filter(&CourseFilter {
            query: "PYTHON".into(),
            access: AccessFilter::Free,
        });
        let slugs: Vec<&str> = python.iter().map(|c| c.slug().as_str()).collect();
        assert_eq!(slugs, vec!["intro-to-python"]);

        let sql = catalog.filter(&CourseFilter {
            query: "summarise".into(),
            access: AccessFilter::All,
        });
        assert_eq!(sql.len(), 1);
    }
}
