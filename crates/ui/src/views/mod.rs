mod about;
mod accessibility;
mod account;
mod contact;
mod course;
mod courses;
mod cv_builder;
mod employer_training;
mod guarantee;
mod home;
mod jobs;
mod not_found;
mod state;
mod subscribe;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use about::AboutView;
pub use accessibility::{AccessibilityPanel, LiveRegion};
pub use account::AccountPanel;
pub use contact::ContactView;
pub use course::CourseView;
pub use courses::CoursesView;
pub use cv_builder::CvBuilderView;
pub use employer_training::EmployerTrainingView;
pub use guarantee::GuaranteeView;
pub use home::HomeView;
pub use jobs::JobsView;
pub use not_found::NotFoundView;
pub use state::{InlineError, SubmitState, ViewError, ViewState, view_state_from_resource};
pub use subscribe::SubscribeView;
