use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many choices.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {} cannot be empty", .index + 1)]
    EmptyOption { index: usize },

    #[error("correct answer index {index} is out of range")]
    InvalidCorrectIndex { index: usize },

    #[error("timestamp must be a whole number of seconds, got {raw:?}")]
    InvalidTime { raw: String },

    #[error("expected {} options, got {len}", OPTION_COUNT)]
    WrongOptionCount { len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question shown when playback reaches `time_secs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    time_secs: u32,
    text: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Trigger offset into the video, in seconds.
    #[must_use]
    pub fn time_secs(&self) -> u32 {
        self.time_secs
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, chosen: usize) -> bool {
        chosen == self.correct_index
    }

    /// True once playback at `current_time` has reached this question.
    #[must_use]
    pub fn is_due(&self, current_time: f64) -> bool {
        current_time >= f64::from(self.time_secs)
    }

    /// Rehydrate a question from storage, re-running draft validation.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted values violate any invariant.
    pub fn from_persisted(
        id: QuestionId,
        time_secs: u32,
        text: String,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let len = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::WrongOptionCount { len })?;
        QuestionDraft {
            time_secs,
            text,
            options,
            correct_index,
        }
        .validate(id)
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question input, as typed into the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub time_secs: u32,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
}

impl QuestionDraft {
    /// Parse the admin's timestamp field.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidTime` unless `raw` is a non-negative integer.
    pub fn parse_time(raw: &str) -> Result<u32, QuestionError> {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| QuestionError::InvalidTime {
                raw: raw.to_string(),
            })
    }

    /// Validate and normalize the draft into a `Question`.
    ///
    /// Text and options are trimmed before the emptiness checks.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for empty text, an empty option, or an
    /// out-of-range correct index.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let options = self.options.map(|opt| opt.trim().to_string());
        if let Some(index) = options.iter().position(String::is_empty) {
            return Err(QuestionError::EmptyOption { index });
        }

        if self.correct_index >= OPTION_COUNT {
            return Err(QuestionError::InvalidCorrectIndex {
                index: self.correct_index,
            });
        }

        Ok(Question {
            id,
            time_secs: self.time_secs,
            text,
            options,
            correct_index: self.correct_index,
        })
    }
}
