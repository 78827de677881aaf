use std::fmt;

use chrono::{DateTime, Utc};
use quiz_core::model::{
    AnswerRecord, OPTION_COUNT, PlaybackPhase, PlaybackSession, Question, QuizConfig, QuizResult,
    SurfaceCapabilities,
};
use tracing::{debug, info, warn};

use super::skip_guard::{SeekVerdict, SkipGuard};
use super::surface::{SurfaceEvent, VideoSurface};
use super::synthetic_clock::SyntheticClock;
use crate::error::PlaybackError;

/// What a time update did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUpdate {
    Ignored,
    Advanced,
    QuestionActivated(usize),
    IllegalSeek,
}

/// Non-fatal notice for the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackWarning {
    IllegalSeek { attempted: f64, restored_to: f64 },
}

impl fmt::Display for PlaybackWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalSeek { .. } => f.write_str(
                "Skipping ahead is not allowed. You must watch the video sequentially.",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TimeSource {
    Reported,
    Synthetic(SyntheticClock),
}

/// Drives one viewing of a quiz: time sync, question triggering, scoring and restart.
pub struct PlaybackController {
    surface: Box<dyn VideoSurface>,
    guard: SkipGuard,
    time_source: TimeSource,
    config: Option<QuizConfig>,
    session: PlaybackSession,
    phase: PlaybackPhase,
    warning: Option<PlaybackWarning>,
}

impl PlaybackController {
    /// Wrap a surface. Surfaces that cannot report time get a synthetic clock.
    #[must_use]
    pub fn new(surface: Box<dyn VideoSurface>) -> Self {
        let capabilities = surface.capabilities();
        let time_source = if capabilities.reports_time {
            TimeSource::Reported
        } else {
            TimeSource::Synthetic(SyntheticClock::new())
        };
        Self {
            surface,
            guard: SkipGuard::for_capabilities(capabilities),
            time_source,
            config: None,
            session: PlaybackSession::new(),
            phase: PlaybackPhase::NoConfig,
            warning: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> Option<&QuizConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn capabilities(&self) -> SurfaceCapabilities {
        self.surface.capabilities()
    }

    #[must_use]
    pub fn uses_synthetic_clock(&self) -> bool {
        matches!(self.time_source, TimeSource::Synthetic(_))
    }

    #[must_use]
    pub fn clock_suspended(&self) -> bool {
        matches!(self.time_source, TimeSource::Synthetic(clock) if clock.is_suspended())
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.config.as_ref().map_or(0, QuizConfig::len)
    }

    /// The question being asked, while one is active or revealed.
    #[must_use]
    pub fn active_question(&self) -> Option<&Question> {
        let index = self.session.active_question()?;
        self.config.as_ref()?.question(index)
    }

    /// The next question that has not fired yet.
    #[must_use]
    pub fn upcoming_question(&self) -> Option<&Question> {
        if self.session.active_question().is_some() {
            return None;
        }
        self.config.as_ref()?.question(self.session.next_index())
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.session.result()
    }

    #[must_use]
    pub fn warning(&self) -> Option<PlaybackWarning> {
        self.warning
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    /// Start a session for `config`.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::NoQuestions` for an empty quiz, or
    /// `PlaybackError::InvalidTransition` if a session is already running.
    pub fn begin(&mut self, config: QuizConfig) -> Result<(), PlaybackError> {
        self.expect_phase(PlaybackPhase::NoConfig, "begin")?;
        if config.is_empty() {
            return Err(PlaybackError::NoQuestions);
        }
        info!(
            kind = %config.video().kind(),
            questions = config.len(),
            "playback session started"
        );
        self.config = Some(config);
        self.session.reset();
        self.warning = None;
        self.phase = PlaybackPhase::Playing;
        Ok(())
    }

    /// Feed a playback position in seconds.
    pub fn on_time_update(&mut self, reported: f64) -> TimeUpdate {
        if self.phase != PlaybackPhase::Playing || !reported.is_finite() {
            return TimeUpdate::Ignored;
        }

        let max_watched = self.session.max_watched_time();
        if let SeekVerdict::Rejected { restore_to } = self.guard.check(reported, max_watched) {
            warn!(
                attempted = reported,
                restored_to = restore_to,
                "rejected forward seek"
            );
            let restored_to = self.session.rewind_to_watched();
            self.surface.seek_to(restored_to);
            self.warning = Some(PlaybackWarning::IllegalSeek {
                attempted: reported,
                restored_to,
            });
            return TimeUpdate::IllegalSeek;
        }

        self.session.observe_time(reported.max(0.0));
        self.check_for_question()
    }

    /// Once-per-second heartbeat.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TimeUpdate {
        self.surface.poll();
        let source = self.time_source;
        match source {
            TimeSource::Synthetic(clock) if clock.is_started() => {
                self.on_time_update(clock.elapsed(now))
            }
            _ => TimeUpdate::Ignored,
        }
    }

    /// Handle a raw message from the surface window.
    pub fn on_surface_message(&mut self, raw: &str) -> TimeUpdate {
        match self.surface.decode_event(raw) {
            Ok(Some(SurfaceEvent::Time {
                current_time,
                player_state,
            })) => {
                if let Some(state) = player_state {
                    debug!(?state, current_time, "player state");
                }
                self.on_time_update(current_time)
            }
            Ok(Some(SurfaceEvent::StateChange(state))) => {
                debug!(?state, "player state changed");
                TimeUpdate::Ignored
            }
            Ok(None) => TimeUpdate::Ignored,
            Err(err) => {
                debug!(error = %err, "ignoring undecodable surface message");
                TimeUpdate::Ignored
            }
        }
    }

    /// The embedded player finished loading. Starts the synthetic clock, if any.
    pub fn on_surface_loaded(&mut self, now: DateTime<Utc>) {
        if let TimeSource::Synthetic(clock) = &mut self.time_source {
            clock.start(now);
            debug!("synthetic clock started");
        }
    }

    /// The viewer paused a player we cannot observe.
    pub fn suspend_clock(&mut self, now: DateTime<Utc>) {
        if let TimeSource::Synthetic(clock) = &mut self.time_source {
            clock.suspend(now);
        }
    }

    pub fn resume_clock(&mut self, now: DateTime<Utc>) {
        if let TimeSource::Synthetic(clock) = &mut self.time_source {
            clock.resume(now);
        }
    }

    /// Answer the active question with option `choice`.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::InvalidChoice` for an index outside the options,
    /// or `PlaybackError::InvalidTransition` if no question is active.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerRecord, PlaybackError> {
        self.expect_phase(PlaybackPhase::QuestionActive, "answer")?;
        if choice >= OPTION_COUNT {
            return Err(PlaybackError::InvalidChoice { choice });
        }
        let question = self.active_question().ok_or(PlaybackError::InvalidTransition {
            action: "answer",
            phase: self.phase,
        })?;
        let record = AnswerRecord {
            question_id: question.id(),
            chosen_index: choice,
            was_correct: question.is_correct(choice),
        };
        self.session.record_answer(record);
        self.phase = PlaybackPhase::AnswerRevealed;
        debug!(
            question = %record.question_id,
            correct = record.was_correct,
            score = self.session.score(),
            "question answered"
        );
        Ok(record)
    }

    /// Dismiss the revealed answer. Resumes playback, or completes the quiz
    /// after the last question.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::InvalidTransition` unless an answer is revealed.
    pub fn acknowledge(&mut self) -> Result<PlaybackPhase, PlaybackError> {
        self.expect_phase(PlaybackPhase::AnswerRevealed, "continue")?;
        self.session.advance();

        let total = self.total_questions();
        if self.session.next_index() >= total {
            let result = self.session.complete(total);
            self.surface.pause();
            self.phase = PlaybackPhase::Completed;
            info!(
                correct = result.correct_count(),
                total = result.total_count(),
                passed = result.passed(),
                "quiz completed"
            );
        } else {
            self.surface.play();
            self.phase = PlaybackPhase::Playing;
        }
        Ok(self.phase)
    }

    /// Start over from the beginning of the video.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::InvalidTransition` unless the quiz is completed.
    pub fn restart(&mut self, now: DateTime<Utc>) -> Result<(), PlaybackError> {
        self.expect_phase(PlaybackPhase::Completed, "restart")?;
        self.session.reset();
        self.warning = None;
        self.surface.seek_to(0.0);
        if let TimeSource::Synthetic(clock) = &mut self.time_source {
            clock.start(now);
        }
        self.surface.play();
        self.phase = PlaybackPhase::Playing;
        info!("quiz restarted");
        Ok(())
    }

    fn expect_phase(
        &self,
        expected: PlaybackPhase,
        action: &'static str,
    ) -> Result<(), PlaybackError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(PlaybackError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn check_for_question(&mut self) -> TimeUpdate {
        if self.session.active_question().is_some() {
            return TimeUpdate::Advanced;
        }
        let index = self.session.next_index();
        let due = self
            .config
            .as_ref()
            .and_then(|config| config.question(index))
            .is_some_and(|question| question.is_due(self.session.current_time()));
        if !due {
            return TimeUpdate::Advanced;
        }

        self.session.activate(index);
        self.phase = PlaybackPhase::QuestionActive;
        self.surface.pause();
        debug!(index, time = self.session.current_time(), "question activated");
        TimeUpdate::QuestionActivated(index)
    }
}
