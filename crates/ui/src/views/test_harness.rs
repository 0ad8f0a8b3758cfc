use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AuthService, CatalogService, Clock, CvService, GuaranteeService, InMemoryBackend,
    JobsService, MockPaymentProvider, StaticJobBoard, SubscriptionService, TrainingService,
};
use signcode_core::model::SubscriptionTier;
use signcode_core::time::fixed_now;
use signcode_core::{AccessPolicy, Catalog};
use storage::repository::{CourseRepository, Storage};
use url::Url;

use crate::context::{UiApp, UiState, UserSession, build_app_context};
use crate::views::{
    AboutView, AccessibilityPanel, ContactView, CourseView, CoursesView, CvBuilderView,
    EmployerTrainingView, GuaranteeView, HomeView, JobsView, LiveRegion, NotFoundView,
    SubscribeView,
};

pub const FREE_EMAIL: &str = "learner@example.org";
pub const PREMIUM_EMAIL: &str = "premium@example.org";
pub const PASSWORD: &str = "secret";

#[derive(Clone)]
struct TestApp {
    policy: AccessPolicy,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    subscriptions: Arc<SubscriptionService>,
    training: Arc<TrainingService>,
    guarantees: Arc<GuaranteeService>,
    jobs: Arc<JobsService>,
    cvs: Arc<CvService>,
}

impl UiApp for TestApp {
    fn policy(&self) -> AccessPolicy {
        self.policy
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    fn subscriptions(&self) -> Arc<SubscriptionService> {
        Arc::clone(&self.subscriptions)
    }

    fn training(&self) -> Arc<TrainingService> {
        Arc::clone(&self.training)
    }

    fn guarantees(&self) -> Arc<GuaranteeService> {
        Arc::clone(&self.guarantees)
    }

    fn jobs(&self) -> Arc<JobsService> {
        Arc::clone(&self.jobs)
    }

    fn cvs(&self) -> Arc<CvService> {
        Arc::clone(&self.cvs)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Courses,
    Course(&'static str),
    CvBuilder,
    Jobs,
    Subscribe,
    EmployerTraining,
    Guarantee,
    Contact,
    About,
    NotFound,
    Accessibility,
}

/// Who is signed in when the view first renders.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Free,
    Premium,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    user: UserSession,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    UiState::provide_with(props.user.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::Course(slug) => rsx! { CourseView { slug: slug.to_owned() } },
        ViewKind::CvBuilder => rsx! { CvBuilderView {} },
        ViewKind::Jobs => rsx! { JobsView {} },
        ViewKind::Subscribe => rsx! { SubscribeView {} },
        ViewKind::EmployerTraining => rsx! { EmployerTrainingView {} },
        ViewKind::Guarantee => rsx! { GuaranteeView {} },
        ViewKind::Contact => rsx! { ContactView {} },
        ViewKind::About => rsx! { AboutView {} },
        ViewKind::NotFound => rsx! {
            NotFoundView { segments: vec!["no".to_owned(), "such".to_owned(), "page".to_owned()] }
        },
        ViewKind::Accessibility => rsx! {
            AccessibilityPanel {}
            LiveRegion {}
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub backend: InMemoryBackend,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, viewer: Viewer) -> ViewHarness {
    let storage = Storage::in_memory();
    let courses = Arc::clone(&storage.courses);
    setup_view_harness_with_courses(view, viewer, storage, courses).await
}

pub async fn setup_view_harness_with_courses(
    view: ViewKind,
    viewer: Viewer,
    storage: Storage,
    courses: Arc<dyn CourseRepository>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let policy = AccessPolicy::Ranked;

    let backend = InMemoryBackend::new();
    backend
        .add_account(FREE_EMAIL, PASSWORD, SubscriptionTier::Free)
        .expect("add free account");
    backend
        .add_account(PREMIUM_EMAIL, PASSWORD, SubscriptionTier::Premium)
        .expect("add premium account");
    let shared: Arc<dyn services::Backend> = Arc::new(backend.clone());

    let catalog = Arc::new(CatalogService::new(courses, policy));
    if let Ok(builtin) = Catalog::builtin() {
        // A failing repository leaves the catalog unseeded.
        let _ = catalog.seed(&builtin).await;
    }

    let auth = Arc::new(AuthService::new(Arc::clone(&shared)));
    let user = match viewer {
        Viewer::Anonymous => UserSession::anonymous(),
        Viewer::Free => auth
            .sign_in(FREE_EMAIL, PASSWORD)
            .await
            .expect("sign in")
            .into(),
        Viewer::Premium => auth
            .sign_in(PREMIUM_EMAIL, PASSWORD)
            .await
            .expect("sign in")
            .into(),
    };

    let checkout_base = Url::parse("https://pay.example.com/checkout").expect("checkout url");
    let app = Arc::new(TestApp {
        policy,
        auth,
        catalog,
        subscriptions: Arc::new(SubscriptionService::new(
            Arc::clone(&shared),
            Arc::new(MockPaymentProvider::new(checkout_base)),
        )),
        training: Arc::new(TrainingService::new(clock, Arc::clone(&shared))),
        guarantees: Arc::new(GuaranteeService::new(clock, Arc::clone(&shared))),
        jobs: Arc::new(JobsService::new(Arc::new(
            StaticJobBoard::builtin().expect("job board"),
        ))),
        cvs: Arc::new(CvService::new(clock, Arc::clone(&storage.cvs))),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view, user });

    ViewHarness {
        dom,
        storage,
        backend,
    }
}
