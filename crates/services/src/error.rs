//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{PlaybackPhase, VideoLinkError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizStoreError {
    #[error(transparent)]
    InvalidVideoLink(#[from] VideoLinkError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PlaybackController` transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("the quiz has no questions; add some on the admin screen")]
    NoQuestions,
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: PlaybackPhase,
    },
    #[error("choice {choice} is not one of the answer options")]
    InvalidChoice { choice: usize },
}

/// An inbound surface message could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SurfaceDecodeError {
    #[error("surface message is not valid JSON: {0}")]
    Malformed(String),
    #[error("surface message is not a JSON object")]
    NotAnObject,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
