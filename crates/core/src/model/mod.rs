mod contact;
mod course;
mod cv;
mod guarantee;
mod ids;
mod job;
mod lesson;
mod plan;
mod scholarship;
mod session;
mod tier;
mod training;

pub use contact::is_plausible_email;
pub use course::{Course, CourseError};
pub use cv::{Cv, CvDraft, CvError, EducationEntry, ExperienceEntry};
pub use guarantee::{
    GuaranteeRequest, GuaranteeRequestDraft, GuaranteeRequestError, REFUND_WINDOW_DAYS, RefundReason,
};
pub use ids::{CourseSlug, JobId, LessonId, ParseIdError, SlugError, UserId};
pub use job::{Accommodation, JobKind, JobListing, JobQuery};
pub use lesson::{Lesson, LessonError};
pub use plan::SubscriptionPlan;
pub use scholarship::Scholarship;
pub use session::Session;
pub use tier::{ParseTierError, SubscriptionTier};
pub use training::{
    CompanySize, TrainingRequest, TrainingRequestDraft, TrainingRequestError, TrainingTopic,
};
