use chrono::{DateTime, Utc};
use quiz_core::model::{PASS_THRESHOLD_PERCENT, PlaybackPhase, VideoKind};
use services::{PlaybackController, PlaybackError};

use crate::vm::time_fmt::{format_clock, format_seconds};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerIntent {
    Answer(usize),
    Continue,
    Restart,
    DismissWarning,
    SurfaceLoaded,
    ToggleClockPause,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedbackVm {
    pub was_correct: bool,
    pub chosen_index: usize,
    pub message: String,
    pub running_score: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionOverlayVm {
    pub heading: String,
    pub text: String,
    pub options: Vec<String>,
    pub feedback: Option<AnswerFeedbackVm>,
    pub continue_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub passed: bool,
    pub headline: &'static str,
    pub score_label: String,
    pub percentage_label: String,
    pub note: String,
}

/// Everything the player screen renders, derived from the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerVm {
    pub kind: VideoKind,
    pub kind_label: &'static str,
    pub embed_url: String,
    pub sequential: bool,
    pub synthetic_clock: bool,
    pub clock_suspended: bool,
    pub debug_label: String,
    pub timing_label: String,
    pub watched_label: String,
    pub question: Option<QuestionOverlayVm>,
    pub completion: Option<CompletionVm>,
    pub progress_label: String,
    pub score_label: String,
    pub passing_label: String,
    pub warning: Option<String>,
}

impl PlayerVm {
    /// `None` until the controller has a configuration.
    #[must_use]
    pub fn from_controller(controller: &PlaybackController) -> Option<Self> {
        let config = controller.config()?;
        let session = controller.session();
        let video = config.video();
        let total = config.len();

        let next_label = controller
            .upcoming_question()
            .map_or_else(|| "none".to_string(), |q| format!("{}s", q.time_secs()));

        let question = controller.active_question().map(|question| {
            let number = session.next_index() + 1;
            let feedback = (controller.phase() == PlaybackPhase::AnswerRevealed)
                .then(|| session.last_answer())
                .flatten()
                .map(|answer| AnswerFeedbackVm {
                    was_correct: answer.was_correct,
                    chosen_index: answer.chosen_index,
                    message: if answer.was_correct {
                        "Correct!".to_string()
                    } else {
                        format!("Incorrect. Correct answer: {}", question.correct_option())
                    },
                    running_score: format!("Current Score: {} / {number}", session.score()),
                });
            QuestionOverlayVm {
                heading: format!("Question {number} of {total}"),
                text: question.text().to_owned(),
                options: question.options().to_vec(),
                feedback,
                continue_label: if number >= total {
                    "Finish Quiz"
                } else {
                    "Continue"
                },
            }
        });

        let completion = controller.result().map(|result| CompletionVm {
            passed: result.passed(),
            headline: if result.passed() { "PASSED!" } else { "FAILED" },
            score_label: format!(
                "Final Score: {} / {}",
                result.correct_count(),
                result.total_count()
            ),
            percentage_label: format!("Percentage: {}%", result.percentage_label()),
            note: if result.passed() {
                format!(
                    "Congratulations! You passed the quiz with {PASS_THRESHOLD_PERCENT}% or higher."
                )
            } else {
                format!("You need {PASS_THRESHOLD_PERCENT}% or higher to pass. Try again!")
            },
        });

        let reached = session.next_index() + usize::from(session.active_question().is_some());
        Some(Self {
            kind: video.kind(),
            kind_label: video.kind().label(),
            embed_url: video.embed_url(),
            sequential: controller.capabilities().can_enforce_sequential(),
            synthetic_clock: controller.uses_synthetic_clock(),
            clock_suspended: controller.clock_suspended(),
            debug_label: format!(
                "Video Type: {}, Video ID: {}",
                video.kind().as_str(),
                video.resolved_id()
            ),
            timing_label: format!(
                "Current: {}, Max Watched: {}, Next Question: {next_label}",
                format_seconds(session.current_time()),
                format_seconds(session.max_watched_time()),
            ),
            watched_label: format!("Watched up to: {}", format_clock(session.max_watched_time())),
            question,
            completion,
            progress_label: format!("Progress: {} / {total} questions", reached.min(total)),
            score_label: format!("Current Score: {} / {total}", session.score()),
            passing_label: format!(
                "Passing score: {} / {total} ({PASS_THRESHOLD_PERCENT}%)",
                config.passing_score()
            ),
            warning: controller.warning().map(|warning| warning.to_string()),
        })
    }
}

/// Route a viewer action to the controller.
///
/// # Errors
///
/// Returns `PlaybackError` if the action is not valid in the current phase.
pub fn apply_intent(
    controller: &mut PlaybackController,
    intent: PlayerIntent,
    now: DateTime<Utc>,
) -> Result<(), PlaybackError> {
    match intent {
        PlayerIntent::Answer(choice) => controller.answer(choice).map(|_| ()),
        PlayerIntent::Continue => controller.acknowledge().map(|_| ()),
        PlayerIntent::Restart => controller.restart(now),
        PlayerIntent::DismissWarning => {
            controller.dismiss_warning();
            Ok(())
        }
        PlayerIntent::SurfaceLoaded => {
            controller.on_surface_loaded(now);
            Ok(())
        }
        PlayerIntent::ToggleClockPause => {
            if controller.clock_suspended() {
                controller.resume_clock(now);
            } else {
                controller.suspend_clock(now);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{QuestionDraft, QuestionId, QuizConfig, VideoSource};
    use quiz_core::time::fixed_now;
    use services::{DriveSurface, RecordingPort, YouTubeSurface};

    fn config(kind: VideoKind, link: &str) -> QuizConfig {
        let questions = [(5, 1), (20, 0)]
            .into_iter()
            .enumerate()
            .map(|(i, (time_secs, correct_index))| {
                QuestionDraft {
                    time_secs,
                    text: format!("Question {}", i + 1),
                    options: ["A".into(), "B".into(), "C".into(), "D".into()],
                    correct_index,
                }
                .validate(QuestionId::new(i as u64 + 1))
                .unwrap()
            })
            .collect();
        QuizConfig::new(VideoSource::parse(kind, link).unwrap(), questions)
    }

    fn youtube() -> PlaybackController {
        let mut controller =
            PlaybackController::new(Box::new(YouTubeSurface::new(RecordingPort::new())));
        controller
            .begin(config(VideoKind::YouTube, "https://youtu.be/abc123"))
            .unwrap();
        controller
    }

    /// Plays forward one second at a time, staying inside the skip tolerance.
    fn watch_until(controller: &mut PlaybackController, secs: u32) {
        for t in 1..=secs {
            controller.on_time_update(f64::from(t));
        }
    }

    #[test]
    fn idle_controller_has_no_vm() {
        let controller = PlaybackController::new(Box::new(DriveSurface));
        assert_eq!(PlayerVm::from_controller(&controller), None);
    }

    #[test]
    fn playing_vm_shows_timing_and_footers() {
        let mut controller = youtube();
        controller.on_time_update(1.0);
        controller.on_time_update(2.5);
        let vm = PlayerVm::from_controller(&controller).unwrap();
        assert_eq!(vm.kind, VideoKind::YouTube);
        assert!(vm.sequential);
        assert!(!vm.synthetic_clock);
        assert_eq!(vm.debug_label, "Video Type: youtube, Video ID: abc123");
        assert_eq!(
            vm.timing_label,
            "Current: 2s, Max Watched: 2s, Next Question: 5s"
        );
        assert_eq!(vm.watched_label, "Watched up to: 0:02");
        assert_eq!(vm.progress_label, "Progress: 0 / 2 questions");
        assert_eq!(vm.passing_label, "Passing score: 2 / 2 (60%)");
        assert!(vm.question.is_none());
    }

    #[test]
    fn question_overlay_walks_through_reveal() {
        let mut controller = youtube();
        watch_until(&mut controller, 5);
        let vm = PlayerVm::from_controller(&controller).unwrap();
        let overlay = vm.question.unwrap();
        assert_eq!(overlay.heading, "Question 1 of 2");
        assert_eq!(overlay.continue_label, "Continue");
        assert!(overlay.feedback.is_none());
        assert_eq!(vm.progress_label, "Progress: 1 / 2 questions");

        apply_intent(&mut controller, PlayerIntent::Answer(0), fixed_now()).unwrap();
        let feedback = PlayerVm::from_controller(&controller)
            .unwrap()
            .question
            .unwrap()
            .feedback
            .unwrap();
        assert!(!feedback.was_correct);
        assert_eq!(feedback.message, "Incorrect. Correct answer: B");
        assert_eq!(feedback.running_score, "Current Score: 0 / 1");
    }

    #[test]
    fn completion_vm_reports_result() {
        let mut controller = youtube();
        let now = fixed_now();
        watch_until(&mut controller, 5);
        apply_intent(&mut controller, PlayerIntent::Answer(1), now).unwrap();
        apply_intent(&mut controller, PlayerIntent::Continue, now).unwrap();
        for t in 6..=20 {
            controller.on_time_update(f64::from(t));
        }
        let overlay = PlayerVm::from_controller(&controller).unwrap().question.unwrap();
        assert_eq!(overlay.continue_label, "Finish Quiz");
        apply_intent(&mut controller, PlayerIntent::Answer(3), now).unwrap();
        apply_intent(&mut controller, PlayerIntent::Continue, now).unwrap();

        let vm = PlayerVm::from_controller(&controller).unwrap();
        let completion = vm.completion.unwrap();
        assert!(!completion.passed);
        assert_eq!(completion.headline, "FAILED");
        assert_eq!(completion.score_label, "Final Score: 1 / 2");
        assert_eq!(completion.percentage_label, "Percentage: 50.0%");
        assert_eq!(vm.progress_label, "Progress: 2 / 2 questions");

        apply_intent(&mut controller, PlayerIntent::Restart, now).unwrap();
        let vm = PlayerVm::from_controller(&controller).unwrap();
        assert!(vm.completion.is_none());
        assert_eq!(vm.score_label, "Current Score: 0 / 2");
    }

    #[test]
    fn toggle_suspends_drive_clock() {
        let mut controller = PlaybackController::new(Box::new(DriveSurface));
        controller
            .begin(config(
                VideoKind::GDrive,
                "https://drive.google.com/file/d/abc-DEF_1/view",
            ))
            .unwrap();
        let start = fixed_now();
        apply_intent(&mut controller, PlayerIntent::SurfaceLoaded, start).unwrap();
        apply_intent(&mut controller, PlayerIntent::ToggleClockPause, start).unwrap();
        assert!(PlayerVm::from_controller(&controller).unwrap().clock_suspended);

        controller.tick(start + Duration::seconds(30));
        assert_eq!(controller.session().current_time(), 0.0);

        apply_intent(
            &mut controller,
            PlayerIntent::ToggleClockPause,
            start + Duration::seconds(30),
        )
        .unwrap();
        let vm = PlayerVm::from_controller(&controller).unwrap();
        assert!(!vm.clock_suspended);
        assert!(!vm.sequential);
        assert!(vm.synthetic_clock);
    }

    #[test]
    fn wrong_phase_intent_is_an_error() {
        let mut controller = youtube();
        assert!(apply_intent(&mut controller, PlayerIntent::Continue, fixed_now()).is_err());
    }
}
