#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod playback;
pub mod quiz_store;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, PlaybackError, QuizStoreError, SurfaceDecodeError};
pub use playback::{
    DriveSurface, MessagePort, PlaybackController, PlaybackWarning, RecordingPort, TimeUpdate,
    VideoSurface, YouTubeSurface,
};
pub use quiz_store::{QUIZ_CONFIG_KEY, QuizDraft, QuizStore, SavedQuiz};
