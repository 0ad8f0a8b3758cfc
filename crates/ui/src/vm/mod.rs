mod course_vm;
mod cv_vm;
mod guarantee_vm;
mod job_vm;
mod plan_vm;
mod player_vm;
mod training_vm;

pub use course_vm::{ACCESS_FILTERS, CourseCardVm, map_course_cards};
pub use cv_vm::{
    CvField, cv_preview_html, markdown_to_html, parse_skills, sanitize_html, set_cv_field,
    skills_text,
};
pub use guarantee_vm::{GuaranteeForm, REFUNDABLE_PLANS, plan_option_label};
pub use job_vm::{
    JobCardVm, accommodation_from_select, kind_from_select, map_job_cards, results_label,
};
pub use plan_vm::{PlanAction, PlanCardVm, map_plan_cards};
pub use player_vm::{LessonItemVm, PlayerVm, map_player};
pub use training_vm::TrainingForm;
