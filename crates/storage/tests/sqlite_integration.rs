use chrono::Duration;
use signcode_core::Catalog;
use signcode_core::model::{CourseSlug, CvDraft, ExperienceEntry};
use signcode_core::time::fixed_now;
use storage::repository::{CourseRepository, CvRepository, Storage};
use storage::sqlite::{SqliteRepository, shared_memory_url};

async fn connect(name: &str) -> SqliteRepository {
    SqliteRepository::open_shared_memory(name)
        .await
        .expect("open shared memory db")
}

#[tokio::test]
async fn builtin_catalog_round_trips_in_order() {
    let repo = connect("memdb_catalog").await;
    let catalog = Catalog::builtin().unwrap();
    for (position, course) in catalog.courses().iter().enumerate() {
        repo.upsert_course(course, u32::try_from(position).unwrap())
            .await
            .unwrap();
    }

    let listed = repo.list_courses().await.unwrap();
    assert_eq!(listed.len(), catalog.len());
    for (stored, original) in listed.iter().zip(catalog.courses()) {
        assert_eq!(stored, original.as_ref());
    }

    let python = repo
        .get_course(&CourseSlug::new("advanced-python").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(python.is_premium());
    assert_eq!(python.lesson_count(), 4);
    assert_eq!(python.lesson(0).unwrap().title(), "Functions in Depth");
}

#[tokio::test]
async fn upsert_replaces_lessons() {
    let repo = connect("memdb_upsert").await;
    let catalog = Catalog::builtin().unwrap();
    let first = catalog.courses()[0].as_ref();
    let second = catalog.courses()[1].as_ref();

    repo.upsert_course(first, 0).await.unwrap();
    // Same slug, different lessons.
    let replaced = signcode_core::model::Course::new(
        first.slug().clone(),
        "Renamed",
        first.summary(),
        false,
        second.lessons().to_vec(),
    )
    .unwrap();
    repo.upsert_course(&replaced, 0).await.unwrap();

    let fetched = repo.get_course(first.slug()).await.unwrap().unwrap();
    assert_eq!(fetched.title(), "Renamed");
    assert_eq!(fetched.lessons(), second.lessons());
    assert_eq!(repo.list_courses().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_course_is_none() {
    let repo = connect("memdb_unknown").await;
    let missing = repo
        .get_course(&CourseSlug::new("nothing-here").unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn cv_is_saved_and_overwritten() {
    let repo = connect("memdb_cv").await;
    let draft = CvDraft {
        full_name: "Sam Carter".into(),
        email: "sam@example.org".into(),
        skills: vec!["HTML".into(), "CSS".into()],
        experience: vec![ExperienceEntry {
            role: "Junior Developer".into(),
            employer: "Acme".into(),
            period: "2023 - now".into(),
            description: String::new(),
        }],
        ..CvDraft::default()
    };
    let cv = draft.clone().validate().unwrap();
    repo.save_cv("local", &cv, fixed_now()).await.unwrap();

    let updated = CvDraft {
        headline: Some("Front-end developer".into()),
        ..draft
    }
    .validate()
    .unwrap();
    let later = fixed_now() + Duration::hours(1);
    repo.save_cv("local", &updated, later).await.unwrap();

    let stored = repo.load_cv("local").await.unwrap().unwrap();
    assert_eq!(stored.cv, updated);
    assert_eq!(stored.updated_at, later);
    assert!(repo.load_cv("someone-else").await.unwrap().is_none());
}

#[tokio::test]
async fn storage_sqlite_wires_repositories() {
    let storage = Storage::sqlite(&shared_memory_url("memdb_storage"))
        .await
        .expect("storage");
    assert!(storage.courses.list_courses().await.unwrap().is_empty());
    assert!(storage.cvs.load_cv("local").await.unwrap().is_none());
}
