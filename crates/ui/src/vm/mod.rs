mod admin_vm;
mod player_vm;
mod time_fmt;

pub use admin_vm::{AdminVm, LinkPreview, QuestionForm, SavedConfigVm, question_error_message};
pub use player_vm::{
    AnswerFeedbackVm, CompletionVm, PlayerIntent, PlayerVm, QuestionOverlayVm, apply_intent,
};
pub use time_fmt::{format_clock, format_seconds};
