use dioxus::prelude::*;
use rounds_core::model::ProgressError;
use services::{BackupError, ProgressServiceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    UnknownTopic,
    InvalidQuantity,
    InvalidDate,
    InvalidPath,
    FileUnavailable,
    ImportRejected,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::UnknownTopic => "Pick a topic from the list.",
            Self::InvalidQuantity => "Enter a whole number of rounds (for example 1 or -1).",
            Self::InvalidDate => "Enter a date as YYYY-MM-DD.",
            Self::InvalidPath => "Enter a file path.",
            Self::FileUnavailable => "Couldn't read or write that file.",
            Self::ImportRejected => "That file is not a valid progress backup. Nothing was changed.",
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

/// Progress of a one-shot user action (record, reset, export, import).
#[derive(Clone, Debug, PartialEq)]
pub enum ActionStatus {
    Idle,
    Working,
    Done(String),
    Failed(ViewError),
}

impl ActionStatus {
    #[must_use]
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }
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

impl From<&ProgressServiceError> for ViewError {
    fn from(err: &ProgressServiceError) -> Self {
        match err {
            ProgressServiceError::Progress(ProgressError::UnknownTopic(_)) => Self::UnknownTopic,
            _ => Self::Unknown,
        }
    }
}

impl From<&BackupError> for ViewError {
    fn from(err: &BackupError) -> Self {
        match err {
            BackupError::Import(_) => Self::ImportRejected,
            BackupError::File { .. } => Self::FileUnavailable,
            _ => Self::Unknown,
        }
    }
}
