mod ids;
mod question;
mod quiz;
mod session;
mod video;

pub use ids::{ParseIdError, QuestionId};
pub use question::{OPTION_COUNT, Question, QuestionDraft, QuestionError};
pub use quiz::{ConfigWarning, PASS_THRESHOLD_PERCENT, QuizConfig};
pub use session::{AnswerRecord, PlaybackPhase, PlaybackSession, QuizResult};
pub use video::{SurfaceCapabilities, VideoKind, VideoLinkError, VideoSource};
