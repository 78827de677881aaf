use std::fmt;

use crate::model::ids::QuestionId;
use crate::model::quiz::PASS_THRESHOLD_PERCENT;

/// Where a playback session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    NoConfig,
    Playing,
    QuestionActive,
    AnswerRevealed,
    Completed,
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackPhase::NoConfig => "no-config",
            PlaybackPhase::Playing => "playing",
            PlaybackPhase::QuestionActive => "question-active",
            PlaybackPhase::AnswerRevealed => "answer-revealed",
            PlaybackPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// One answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub chosen_index: usize,
    pub was_correct: bool,
}

/// Final score of a completed session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    correct_count: usize,
    total_count: usize,
    percentage: f64,
    passed: bool,
}

impl QuizResult {
    /// Score `correct_count` out of `total_count`.
    ///
    /// The percentage is rounded to one decimal; the pass decision uses exact
    /// integer arithmetic so rounding can never flip it.
    #[must_use]
    pub fn from_counts(correct_count: usize, total_count: usize) -> Self {
        if total_count == 0 {
            return Self {
                correct_count,
                total_count,
                percentage: 0.0,
                passed: false,
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let raw = 100.0 * correct_count as f64 / total_count as f64;
        let percentage = (raw * 10.0).round() / 10.0;
        let passed = correct_count * 100 >= total_count * PASS_THRESHOLD_PERCENT as usize;
        Self {
            correct_count,
            total_count,
            percentage,
            passed,
        }
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Percentage with exactly one decimal, e.g. `"50.0"`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// Ephemeral state of one viewing. Never persisted.
///
/// `max_watched_time` only grows and `answers` only appends until `reset`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSession {
    current_time: f64,
    max_watched_time: f64,
    next_index: usize,
    active_question: Option<usize>,
    answers: Vec<AnswerRecord>,
    score: usize,
    result: Option<QuizResult>,
}

impl PlaybackSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn max_watched_time(&self) -> f64 {
        self.max_watched_time
    }

    /// Index of the next question that has not been answered yet.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    #[must_use]
    pub fn active_question(&self) -> Option<usize> {
        self.active_question
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.answers.last()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Accept a playback position, extending the watched range when it moves forward.
    pub fn observe_time(&mut self, current_time: f64) {
        self.current_time = current_time;
        if current_time > self.max_watched_time {
            self.max_watched_time = current_time;
        }
    }

    /// Snap the position back to the furthest watched point.
    pub fn rewind_to_watched(&mut self) -> f64 {
        self.current_time = self.max_watched_time;
        self.max_watched_time
    }

    pub fn activate(&mut self, index: usize) {
        self.active_question = Some(index);
    }

    pub fn record_answer(&mut self, record: AnswerRecord) {
        if record.was_correct {
            self.score += 1;
        }
        self.answers.push(record);
    }

    /// Clear the active question and move on to the next one.
    pub fn advance(&mut self) {
        self.active_question = None;
        self.next_index += 1;
    }

    pub fn complete(&mut self, total_count: usize) -> QuizResult {
        let result = QuizResult::from_counts(self.score, total_count);
        self.result = Some(result);
        result
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
