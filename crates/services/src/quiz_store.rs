use std::sync::Arc;

use quiz_core::model::{ConfigWarning, Question, QuizConfig, VideoKind, VideoSource};
use storage::QuizRecord;
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::QuizStoreError;

/// Key under which the whole quiz configuration is stored.
pub const QUIZ_CONFIG_KEY: &str = "quizData";

/// Unvalidated admin input for a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub kind: VideoKind,
    pub raw_link: String,
    pub questions: Vec<Question>,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedQuiz {
    pub config: QuizConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Loads, replaces and clears the persisted quiz configuration.
#[derive(Clone)]
pub struct QuizStore {
    kv: Arc<dyn KeyValueStore>,
}

impl QuizStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the stored configuration.
    ///
    /// A missing key yields `Ok(None)`. Stored data that cannot be decoded or
    /// fails validation is logged and also yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `QuizStoreError::Storage` if the backend cannot be read.
    pub async fn load(&self) -> Result<Option<QuizConfig>, QuizStoreError> {
        let Some(raw) = self.kv.get(QUIZ_CONFIG_KEY).await? else {
            debug!("no stored quiz configuration");
            return Ok(None);
        };

        let record = match QuizRecord::from_json(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "ignoring malformed stored quiz configuration");
                return Ok(None);
            }
        };

        match record.into_config() {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                warn!(error = %err, "ignoring invalid stored quiz configuration");
                Ok(None)
            }
        }
    }

    /// Validate the draft and replace the stored configuration.
    ///
    /// Nothing is written when the video link is invalid.
    ///
    /// # Errors
    ///
    /// Returns `QuizStoreError::InvalidVideoLink` if the link does not match
    /// the selected kind, or `QuizStoreError::Storage` if the write fails.
    pub async fn save(&self, draft: QuizDraft) -> Result<SavedQuiz, QuizStoreError> {
        let video = VideoSource::parse(draft.kind, draft.raw_link)?;
        let config = QuizConfig::new(video, draft.questions);
        let json = QuizRecord::from_config(&config).to_json()?;
        self.kv.put(QUIZ_CONFIG_KEY, &json).await?;

        let warnings = config.warnings();
        info!(
            kind = %config.video().kind(),
            video_id = config.video().resolved_id(),
            questions = config.len(),
            warnings = warnings.len(),
            "quiz configuration saved"
        );
        Ok(SavedQuiz { config, warnings })
    }

    /// Remove the stored configuration. Clearing twice is fine.
    ///
    /// # Errors
    ///
    /// Returns `QuizStoreError::Storage` if the backend cannot be written.
    pub async fn clear(&self) -> Result<(), QuizStoreError> {
        self.kv.remove(QUIZ_CONFIG_KEY).await?;
        info!("quiz configuration cleared");
        Ok(())
    }
}
