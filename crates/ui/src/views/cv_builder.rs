use dioxus::prelude::*;
use services::{CvService, CvServiceError};
use signcode_core::model::{CvDraft, EducationEntry, ExperienceEntry};
use tracing::warn;

use crate::context::{AppContext, UiState};
use crate::views::{InlineError, SubmitState, ViewError, ViewState, view_state_from_resource};
use crate::vm::{CvField, cv_preview_html, parse_skills, set_cv_field, skills_text};

#[component]
pub fn CvBuilderView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<UiState>();
    let user = state.user;
    let cvs = ctx.cvs();
    let mut draft = use_signal(CvDraft::default);
    let mut skills = use_signal(String::new);
    let mut submit = use_signal(|| SubmitState::Idle);

    let cvs_for_resource = cvs.clone();
    let resource = use_resource(move || {
        let cvs = cvs_for_resource.clone();
        let owner = CvService::owner_for(&user.read().session);
        async move {
            let stored = cvs
                .load(&owner)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(stored.map(|stored| {
                draft.set(stored.cv.to_draft());
                skills.set(skills_text(stored.cv.skills()));
                stored.updated_at.format("%-d %B %Y at %H:%M").to_string()
            }))
        }
    });

    let on_save = move |_: MouseEvent| {
        let cvs = cvs.clone();
        let owner = CvService::owner_for(&user.peek().session);
        let mut to_save = draft();
        to_save.skills = parse_skills(&skills.peek());
        spawn(async move {
            submit.set(SubmitState::Submitting);
            match cvs.save_draft(&owner, to_save).await {
                Ok(cv) => {
                    draft.set(cv.to_draft());
                    skills.set(skills_text(cv.skills()));
                    submit.set(SubmitState::Done);
                }
                Err(CvServiceError::Invalid(err)) => submit.set(SubmitState::Invalid(err.to_string())),
                Err(err) => {
                    warn!("cv save failed: {err}");
                    submit.set(SubmitState::Failed(ViewError::from(&err)));
                }
            }
        });
    };

    let mut preview_draft = draft();
    preview_draft.skills = parse_skills(&skills());
    let preview = preview_draft.validate();
    let values = draft();
    let summary = values.summary.clone().unwrap_or_default();
    let busy = submit().is_submitting();
    let error = submit().error_message();
    let last_saved = match view_state_from_resource(&resource) {
        ViewState::Ready(Some(at)) => Some(format!("Last saved {at}")),
        ViewState::Error(err) => Some(err.message().to_owned()),
        _ => None,
    };

    let experience_rows = values.experience.iter().enumerate().map(|(index, entry)| {
        let mut draft = draft;
        let mut edit = move |apply: fn(&mut ExperienceEntry, String), value: String| {
            if let Some(entry) = draft.write().experience.get_mut(index) {
                apply(entry, value);
            }
        };
        rsx! {
            fieldset { key: "exp-{index}", class: "cv-entry",
                legend { "Experience {index + 1}" }
                input {
                    aria_label: "Role",
                    placeholder: "Role",
                    value: "{entry.role}",
                    oninput: move |evt| edit(|e, v| e.role = v, evt.value()),
                }
                input {
                    aria_label: "Employer",
                    placeholder: "Employer",
                    value: "{entry.employer}",
                    oninput: move |evt| edit(|e, v| e.employer = v, evt.value()),
                }
                input {
                    aria_label: "Dates",
                    placeholder: "2023 to present",
                    value: "{entry.period}",
                    oninput: move |evt| edit(|e, v| e.period = v, evt.value()),
                }
                textarea {
                    aria_label: "What you did",
                    rows: "3",
                    value: "{entry.description}",
                    oninput: move |evt| edit(|e, v| e.description = v, evt.value()),
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        let mut current = draft.write();
                        if index < current.experience.len() {
                            current.experience.remove(index);
                        }
                    },
                    "Remove"
                }
            }
        }
    });

    let education_rows = values.education.iter().enumerate().map(|(index, entry)| {
        let mut draft = draft;
        let mut edit = move |apply: fn(&mut EducationEntry, String), value: String| {
            if let Some(entry) = draft.write().education.get_mut(index) {
                apply(entry, value);
            }
        };
        rsx! {
            fieldset { key: "edu-{index}", class: "cv-entry",
                legend { "Education {index + 1}" }
                input {
                    aria_label: "Qualification",
                    placeholder: "Qualification",
                    value: "{entry.qualification}",
                    oninput: move |evt| edit(|e, v| e.qualification = v, evt.value()),
                }
                input {
                    aria_label: "Institution",
                    placeholder: "Institution",
                    value: "{entry.institution}",
                    oninput: move |evt| edit(|e, v| e.institution = v, evt.value()),
                }
                input {
                    aria_label: "Dates",
                    placeholder: "2021",
                    value: "{entry.period}",
                    oninput: move |evt| edit(|e, v| e.period = v, evt.value()),
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        let mut current = draft.write();
                        if index < current.education.len() {
                            current.education.remove(index);
                        }
                    },
                    "Remove"
                }
            }
        }
    });

    rsx! {
        div { class: "page cv-page",
            header { class: "view-header",
                h2 { class: "view-title", "CV builder" }
                p { class: "view-subtitle", "Fill in what you can. The preview updates as you type." }
                if let Some(note) = last_saved {
                    p { class: "cv-last-saved", "{note}" }
                }
            }
            div { class: "cv-layout",
                section { class: "cv-form", aria_label: "CV details",
                    CvTextInput { id: "cv-name", label: "Full name", value: values.full_name.clone(), field: CvField::FullName, draft }
                    CvTextInput { id: "cv-email", label: "Email", value: values.email.clone(), field: CvField::Email, draft }
                    CvTextInput { id: "cv-phone", label: "Phone (optional)", value: values.phone.clone().unwrap_or_default(), field: CvField::Phone, draft }
                    CvTextInput { id: "cv-headline", label: "Headline (optional)", value: values.headline.clone().unwrap_or_default(), field: CvField::Headline, draft }
                    label { r#for: "cv-summary", "Profile (optional)" }
                    textarea {
                        id: "cv-summary",
                        rows: "4",
                        value: "{summary}",
                        oninput: move |evt| set_cv_field(&mut draft.write(), CvField::Summary, evt.value()),
                    }
                    label { r#for: "cv-skills", "Skills, separated by commas" }
                    input {
                        id: "cv-skills",
                        value: "{skills}",
                        oninput: move |evt| skills.set(evt.value()),
                    }
                    h3 { "Experience" }
                    {experience_rows}
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| draft.write().experience.push(ExperienceEntry::default()),
                        "Add experience"
                    }
                    h3 { "Education" }
                    {education_rows}
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| draft.write().education.push(EducationEntry::default()),
                        "Add education"
                    }
                    if let Some(message) = error {
                        InlineError {
                            message,
                            on_dismiss: move |()| submit.set(SubmitState::Idle),
                        }
                    }
                    if submit() == SubmitState::Done {
                        p { class: "form-success", role: "status", "CV saved." }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy,
                        onclick: on_save,
                        if busy { "Saving..." } else { "Save CV" }
                    }
                }
                section { class: "cv-preview", aria_label: "Preview",
                    match preview {
                        Ok(cv) => rsx! {
                            article { class: "cv-document", dangerous_inner_html: "{cv_preview_html(&cv)}" }
                        },
                        Err(err) => rsx! {
                            p { class: "empty-state", "The preview appears once your CV is valid: {err}." }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn CvTextInput(
    id: &'static str,
    label: &'static str,
    value: String,
    field: CvField,
    draft: Signal<CvDraft>,
) -> Element {
    let mut draft = draft;
    rsx! {
        label { r#for: "{id}", "{label}" }
        input {
            id: "{id}",
            value: "{value}",
            oninput: move |evt| set_cv_field(&mut draft.write(), field, evt.value()),
        }
    }
}
