use dioxus::prelude::*;
use services::{
    BackendError, CatalogServiceError, CourseAccessError, CvServiceError, GuaranteeError,
    PaymentError, TrainingError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    Unavailable,
    SignInRequired,
    InvalidCredentials,
    SessionExpired,
    PaymentNotVerified,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::Unavailable => "We could not reach the server. Check your connection and try again.",
            Self::SignInRequired => "Please sign in first.",
            Self::InvalidCredentials => "That email and password do not match an account.",
            Self::SessionExpired => "Your session has expired. Please sign in again.",
            Self::PaymentNotVerified => "We could not confirm that payment yet.",
        }
    }
}

impl From<&BackendError> for ViewError {
    fn from(err: &BackendError) -> Self {
        match err {
            BackendError::InvalidCredentials => Self::InvalidCredentials,
            BackendError::SessionExpired => Self::SessionExpired,
            BackendError::HttpStatus(_) | BackendError::Http(_) => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}

impl From<&PaymentError> for ViewError {
    fn from(err: &PaymentError) -> Self {
        match err {
            PaymentError::NotSignedIn => Self::SignInRequired,
            PaymentError::NotVerified => Self::PaymentNotVerified,
            PaymentError::Backend(err) => err.into(),
            _ => Self::Unknown,
        }
    }
}

impl From<&TrainingError> for ViewError {
    fn from(err: &TrainingError) -> Self {
        match err {
            TrainingError::Backend(err) => err.into(),
            _ => Self::Unknown,
        }
    }
}

impl From<&GuaranteeError> for ViewError {
    fn from(err: &GuaranteeError) -> Self {
        match err {
            GuaranteeError::Backend(err) => err.into(),
            _ => Self::Unknown,
        }
    }
}

impl From<&CatalogServiceError> for ViewError {
    fn from(_: &CatalogServiceError) -> Self {
        Self::Unknown
    }
}

impl From<&CourseAccessError> for ViewError {
    fn from(_: &CourseAccessError) -> Self {
        Self::Unknown
    }
}

impl From<&CvServiceError> for ViewError {
    fn from(_: &CvServiceError) -> Self {
        Self::Unknown
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Progress of a form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    /// Rejected locally; the message comes from the validator.
    Invalid(String),
    Failed(ViewError),
    Done,
}

impl SubmitState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Invalid(message) => Some(message.clone()),
            Self::Failed(err) => Some(err.message().to_owned()),
            Self::Idle | Self::Submitting | Self::Done => None,
        }
    }
}

/// Dismissible inline error, shared by the forms.
#[component]
pub fn InlineError(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "inline-error", role: "alert",
            p { "{message}" }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}
