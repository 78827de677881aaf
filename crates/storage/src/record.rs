use quiz_core::model::{
    Question, QuestionError, QuestionId, QuizConfig, VideoKind, VideoLinkError, VideoSource,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::StorageError;

/// Stored record failed domain validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error(transparent)]
    Video(#[from] VideoLinkError),

    #[error("question {id}: {source}")]
    Question {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
}

/// Persisted shape of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    pub time: u32,
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().value(),
            time: question.time_secs(),
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            answer: question.correct_index(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Question` if the stored values fail validation.
    pub fn into_question(self) -> Result<Question, RecordError> {
        let id = QuestionId::new(self.id);
        Question::from_persisted(id, self.time, self.question, self.options, self.answer)
            .map_err(|source| RecordError::Question { id, source })
    }
}

/// Persisted shape of a quiz configuration.
///
/// Field names match the JSON written by earlier browser builds. Records from
/// before the `videoType` field existed deserialize with `video_type: None`,
/// which means YouTube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    #[serde(default)]
    pub video_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<VideoKind>,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
}

impl QuizRecord {
    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        let video = config.video();
        Self {
            video_link: video.raw_link().to_owned(),
            video_type: Some(video.kind()),
            video_id: video.resolved_id().to_owned(),
            questions: config
                .questions()
                .iter()
                .map(QuestionRecord::from_question)
                .collect(),
        }
    }

    /// Kind of the stored video, defaulting legacy records to YouTube.
    #[must_use]
    pub fn kind(&self) -> VideoKind {
        self.video_type.unwrap_or_default()
    }

    /// Convert the record back into a domain `QuizConfig`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the video reference or any question is invalid.
    pub fn into_config(self) -> Result<QuizConfig, RecordError> {
        let kind = self.kind();
        let video = VideoSource::from_persisted(kind, self.video_link, self.video_id)?;
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuizConfig::new(video, questions))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record cannot be encoded.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `raw` is not a valid record.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;

    fn config(kind: VideoKind, link: &str) -> QuizConfig {
        let question = QuestionDraft {
            time_secs: 5,
            text: "Pick B".into(),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index: 1,
        }
        .validate(QuestionId::new(1_700_000_000_000))
        .unwrap();
        QuizConfig::new(VideoSource::parse(kind, link).unwrap(), vec![question])
    }

    #[test]
    fn encodes_browser_field_names() {
        let record = QuizRecord::from_config(&config(VideoKind::YouTube, "https://youtu.be/abc123"));
        let json = record.to_json().unwrap();
        assert!(json.contains("\"videoLink\":\"https://youtu.be/abc123\""), "{json}");
        assert!(json.contains("\"videoType\":\"youtube\""), "{json}");
        assert!(json.contains("\"videoId\":\"abc123\""), "{json}");
        assert!(json.contains("\"answer\":1"), "{json}");
    }

    #[test]
    fn decodes_drive_record() {
        let original = config(
            VideoKind::GDrive,
            "https://drive.google.com/file/d/F1le_Id/view?usp=sharing",
        );
        let json = QuizRecord::from_config(&original).to_json().unwrap();
        let restored = QuizRecord::from_json(&json).unwrap().into_config().unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn legacy_record_without_kind_is_youtube() {
        let raw = r#"{
            "videoLink": "https://www.youtube.com/watch?v=abc123",
            "videoId": "abc123",
            "questions": [
                {"id": 1, "time": 5, "question": "Q", "options": ["A","B","C","D"], "answer": 0}
            ]
        }"#;
        let record = QuizRecord::from_json(raw).unwrap();
        assert_eq!(record.video_type, None);
        let config = record.into_config().unwrap();
        assert_eq!(config.video().kind(), VideoKind::YouTube);
        assert_eq!(config.video().resolved_id(), "abc123");
    }

    #[test]
    fn null_video_type_is_youtube() {
        let raw = r#"{
            "videoLink": "https://youtu.be/abc123",
            "videoType": null,
            "videoId": "abc123",
            "questions": []
        }"#;
        let record = QuizRecord::from_json(raw).unwrap();
        assert_eq!(record.video_type, None);
        assert_eq!(record.kind(), VideoKind::YouTube);
        let config = record.into_config().unwrap();
        assert_eq!(config.video().kind(), VideoKind::YouTube);
        assert_eq!(config.video().resolved_id(), "abc123");
    }

    #[test]
    fn rejects_question_with_bad_answer_index() {
        let raw = r#"{
            "videoLink": "https://youtu.be/abc123",
            "videoType": "youtube",
            "videoId": "abc123",
            "questions": [
                {"id": 7, "time": 5, "question": "Q", "options": ["A","B","C","D"], "answer": 9}
            ]
        }"#;
        let err = QuizRecord::from_json(raw).unwrap().into_config().unwrap_err();
        assert!(matches!(err, RecordError::Question { id, .. } if id == QuestionId::new(7)));
    }

    #[test]
    fn rejects_unknown_video_type() {
        let raw = r#"{"videoLink": "x", "videoType": "vimeo", "videoId": "1", "questions": []}"#;
        assert!(QuizRecord::from_json(raw).is_err());
    }
}
