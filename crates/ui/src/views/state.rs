use dioxus::prelude::*;
use services::{PlaybackError, QuizStoreError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NoQuestions,
    InvalidLink(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unknown => "Something went wrong. Please try again.".to_string(),
            Self::NoQuestions => {
                "This quiz has no questions yet. Add some in the Admin Panel.".to_string()
            }
            Self::InvalidLink(message) => message.clone(),
        }
    }
}

impl From<QuizStoreError> for ViewError {
    fn from(err: QuizStoreError) -> Self {
        match err {
            QuizStoreError::InvalidVideoLink(link) => Self::InvalidLink(link.to_string()),
            _ => Self::Unknown,
        }
    }
}

impl From<PlaybackError> for ViewError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::NoQuestions => Self::NoQuestions,
            _ => Self::Unknown,
        }
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
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
