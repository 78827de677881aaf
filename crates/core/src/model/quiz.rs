use std::fmt;

use crate::model::question::Question;
use crate::model::video::VideoSource;

/// Minimum percentage of correct answers needed to pass.
pub const PASS_THRESHOLD_PERCENT: u32 = 60;

/// Non-fatal problems with a saved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The quiz can be played but never completes.
    NoQuestions,
    /// Several questions share a trigger time; they fire one after another in list order.
    DuplicateTriggerTime { time_secs: u32 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::NoQuestions => {
                f.write_str("the quiz has no questions, so viewers can never finish it")
            }
            ConfigWarning::DuplicateTriggerTime { time_secs } => write!(
                f,
                "more than one question triggers at {time_secs}s; they will be asked in list order"
            ),
        }
    }
}

/// Video reference plus questions ordered by trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    video: VideoSource,
    questions: Vec<Question>,
}

impl QuizConfig {
    /// Build a config, stable-sorting questions ascending by trigger time.
    #[must_use]
    pub fn new(video: VideoSource, mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(Question::time_secs);
        Self { video, questions }
    }

    #[must_use]
    pub fn video(&self) -> &VideoSource {
        &self.video
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Correct answers needed to pass, rounded up.
    #[must_use]
    pub fn passing_score(&self) -> usize {
        let total = self.questions.len();
        let threshold = PASS_THRESHOLD_PERCENT as usize;
        (total * threshold).div_ceil(100)
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        if self.questions.is_empty() {
            return vec![ConfigWarning::NoQuestions];
        }
        let mut warnings = Vec::new();
        for pair in self.questions.windows(2) {
            let time_secs = pair[0].time_secs();
            let already = warnings.contains(&ConfigWarning::DuplicateTriggerTime { time_secs });
            if time_secs == pair[1].time_secs() && !already {
                warnings.push(ConfigWarning::DuplicateTriggerTime { time_secs });
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionId, VideoKind};

    fn question(id: u64, time_secs: u32) -> Question {
        QuestionDraft {
            time_secs,
            text: format!("Q{id}"),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index: 0,
        }
        .validate(QuestionId::new(id))
        .unwrap()
    }

    fn video() -> VideoSource {
        VideoSource::parse(VideoKind::YouTube, "https://youtu.be/abc123").unwrap()
    }

    #[test]
    fn new_sorts_by_time_keeping_ties_in_order() {
        let config = QuizConfig::new(
            video(),
            vec![question(1, 30), question(2, 10), question(3, 30), question(4, 0)],
        );
        let ids: Vec<u64> = config.questions().iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }

    #[test]
    fn passing_score_rounds_up() {
        let config = QuizConfig::new(video(), vec![question(1, 1), question(2, 2)]);
        assert_eq!(config.passing_score(), 2);
        let five: Vec<Question> = (1..=5).map(|i| question(i, u32::try_from(i).unwrap())).collect();
        assert_eq!(QuizConfig::new(video(), five).passing_score(), 3);
        assert_eq!(QuizConfig::new(video(), Vec::new()).passing_score(), 0);
    }

    #[test]
    fn warnings_flag_empty_quiz() {
        let config = QuizConfig::new(video(), Vec::new());
        assert_eq!(config.warnings(), vec![ConfigWarning::NoQuestions]);
    }

    #[test]
    fn warnings_flag_each_duplicate_time_once() {
        let config = QuizConfig::new(
            video(),
            vec![question(1, 5), question(2, 5), question(3, 5), question(4, 9)],
        );
        assert_eq!(
            config.warnings(),
            vec![ConfigWarning::DuplicateTriggerTime { time_secs: 5 }]
        );
    }
}
