use std::sync::Arc;

use async_trait::async_trait;
use services::cv_service::LOCAL_OWNER;
use signcode_core::model::{Course, CourseSlug, CvDraft};
use signcode_core::time::fixed_now;
use storage::repository::{CourseRepository, CvRepository, Storage, StorageError};

use super::test_harness::{ViewKind, Viewer, setup_view_harness, setup_view_harness_with_courses};

struct FailingCourses;

#[async_trait]
impl CourseRepository for FailingCourses {
    async fn upsert_course(&self, _course: &Course, _position: u32) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_course(&self, _slug: &CourseSlug) -> Result<Option<Course>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_course_count() {
    let mut harness = setup_view_harness(ViewKind::Home, Viewer::Free).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("5 courses available"), "missing count in {html}");
    assert!(
        html.contains("Welcome back, learner@example.org."),
        "missing greeting in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_marks_locked_courses() {
    let mut harness = setup_view_harness(ViewKind::Courses, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Digital Literacy 101"), "missing course in {html}");
    assert!(html.contains("3 lessons"), "missing lesson count in {html}");
    assert!(html.contains("Requires Premium"), "missing lock in {html}");
    assert!(html.contains("Start course"), "missing start link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_shows_error_state() {
    let mut harness = setup_view_harness_with_courses(
        ViewKind::Courses,
        Viewer::Anonymous,
        Storage::in_memory(),
        Arc::new(FailingCourses),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_opens_free_course_for_anonymous() {
    let mut harness =
        setup_view_harness(ViewKind::Course("digital-literacy-101"), Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1 of 3"), "missing position in {html}");
    assert!(
        html.contains("Getting Started with Computers"),
        "missing lesson in {html}"
    );
    assert!(html.contains("0 of 3 complete (0%)"), "missing progress in {html}");
    assert!(html.contains("Mark complete"), "missing control in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_paywalls_premium_course() {
    let mut harness =
        setup_view_harness(ViewKind::Course("advanced-python"), Viewer::Free).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("This course is part of Premium"),
        "missing paywall in {html}"
    );
    assert!(html.contains("See plans"), "missing upsell in {html}");
    assert!(!html.contains("Lesson 1 of"), "player rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_opens_premium_course_for_premium() {
    let mut harness =
        setup_view_harness(ViewKind::Course("advanced-python"), Viewer::Premium).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1 of"), "missing player in {html}");
    assert!(!html.contains("See plans"), "paywall rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_unknown_slug_is_not_found() {
    for slug in ["no-such-course", "Not A Slug!"] {
        let mut harness = setup_view_harness(ViewKind::Course(slug), Viewer::Premium).await;
        harness.settle().await;
        let html = harness.render();
        assert!(html.contains("Course not found"), "missing empty state in {html}");
        assert!(!html.contains("See plans"), "paywall rendered in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn subscribe_view_smoke_offers_upgrade_to_free_user() {
    let mut harness = setup_view_harness(ViewKind::Subscribe, Viewer::Free).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your current plan"), "missing current plan in {html}");
    assert!(html.contains("Subscribe to Premium"), "missing upgrade in {html}");
    assert!(html.contains("$5/month"), "missing price in {html}");
    assert!(html.contains("Contact sales"), "missing sales link in {html}");
    assert!(html.contains(r#"href="/contact""#), "sales link target in {html}");
    assert!(html.contains("$99/month"), "missing enterprise price in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subscribe_view_smoke_shows_scholarship_and_guarantee() {
    let mut harness = setup_view_harness(ViewKind::Subscribe, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Power Learn Project Scholarship"), "missing scholarship in {html}");
    assert!(html.contains("Limited to 100 scholarships per quarter"), "missing slots in {html}");
    assert!(
        html.contains("https://powerlearnprojectafrica.org/programs/1-million-devs-for-africa"),
        "missing partner link in {html}"
    );
    assert!(html.contains("30-day money-back guarantee"), "missing guarantee in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subscribe_view_smoke_asks_anonymous_to_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Subscribe, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in to subscribe"), "missing prompt in {html}");
    assert!(!html.contains("Subscribe to Premium"), "upgrade offered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn jobs_view_smoke_lists_builtin_jobs() {
    let mut harness = setup_view_harness(ViewKind::Jobs, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("5 jobs"), "missing count in {html}");
    assert!(html.contains("Junior Web Developer"), "missing listing in {html}");
    assert!(html.contains("Captioned meetings"), "missing accommodation in {html}");
    assert!(
        html.contains("https://www.brightermonday.co.ke/jobs"),
        "missing external link in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn cv_builder_smoke_loads_saved_cv_into_preview() {
    let storage = Storage::in_memory();
    let cv = CvDraft {
        full_name: "Jo Bloggs".into(),
        email: "jo@example.org".into(),
        skills: vec!["SQL".into(), "Excel".into()],
        ..CvDraft::default()
    }
    .validate()
    .unwrap();
    storage
        .cvs
        .save_cv(LOCAL_OWNER, &cv, fixed_now())
        .await
        .expect("save cv");

    let courses = Arc::clone(&storage.courses);
    let mut harness =
        setup_view_harness_with_courses(ViewKind::CvBuilder, Viewer::Anonymous, storage, courses)
            .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Last saved"), "missing saved note in {html}");
    assert!(html.contains("<h1>Jo Bloggs</h1>"), "missing preview in {html}");
    assert!(html.contains("<li>Excel</li>"), "missing skills in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn cv_builder_smoke_empty_draft_explains_preview() {
    let mut harness = setup_view_harness(ViewKind::CvBuilder, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("The preview appears once your CV is valid"),
        "missing hint in {html}"
    );
    assert!(!html.contains("Last saved"), "unexpected saved note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn employer_training_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::EmployerTraining, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Company size"), "missing field in {html}");
    assert!(html.contains("1000+ employees"), "missing size band in {html}");
    assert!(html.contains("Phone (optional)"), "missing phone in {html}");
    assert_eq!(html.matches(r#"type="checkbox""#).count(), 6, "topics in {html}");
    assert!(html.contains("Reasonable Accommodations"), "missing topic in {html}");
    assert!(html.contains("Request training"), "missing submit in {html}");
    assert!(harness.backend.records("employer_training_requests").unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn guarantee_smoke_prefills_paid_subscriber() {
    let mut harness = setup_view_harness(ViewKind::Guarantee, Viewer::Premium).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("30-Day Money Back Guarantee"), "missing title in {html}");
    assert!(html.contains("premium@example.org"), "email not prefilled in {html}");
    assert!(html.contains("Premium Plan ($5/month)"), "missing plan option in {html}");
    assert!(html.contains("Enterprise Plan ($99/month)"), "missing plan option in {html}");
    assert!(html.contains("Course content not as expected"), "missing reason in {html}");
    assert!(html.contains("Submit refund request"), "missing submit in {html}");
    assert!(harness.backend.records("guarantee_requests").unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn contact_smoke_offers_email_and_booking() {
    let mut harness = setup_view_harness(ViewKind::Contact, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("mailto:info@sign2code.com"), "missing email link in {html}");
    assert!(
        html.contains("https://calendly.com/gideonthuku14/30min"),
        "missing booking link in {html}"
    );
    assert!(html.contains("Book Appointment"), "missing booking button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn about_smoke_introduces_the_team() {
    let mut harness = setup_view_harness(ViewKind::About, Viewer::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("About Sign-to-Code"), "missing title in {html}");
    assert!(html.contains("Rosemary Emeli"), "missing team member in {html}");
    assert!(html.contains("mailto:gideon@sign2code.org"), "missing team email in {html}");
    assert!(html.contains("Start Learning"), "missing call to action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn not_found_smoke_echoes_path() {
    let mut harness = setup_view_harness(ViewKind::NotFound, Viewer::Anonymous).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Page not found"), "missing title in {html}");
    assert!(html.contains("/no/such/page"), "missing path in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn accessibility_panel_smoke_renders_defaults() {
    let mut harness = setup_view_harness(ViewKind::Accessibility, Viewer::Anonymous).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("High contrast"), "missing toggle in {html}");
    assert!(html.contains("Screen reader announcements"), "missing toggle in {html}");
    assert!(html.contains("aria-checked=\"false\""), "missing switch state in {html}");
    assert!(!html.contains("aria-checked=\"true\""), "unexpected switch state in {html}");
    assert!(html.contains("100%"), "missing font scale in {html}");
    assert!(html.contains("aria-live=\"polite\""), "missing live region in {html}");
}
