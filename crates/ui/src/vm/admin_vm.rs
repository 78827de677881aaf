use quiz_core::model::{
    OPTION_COUNT, PASS_THRESHOLD_PERCENT, Question, QuestionDraft, QuestionError, QuestionId,
    QuizConfig, VideoKind,
};
use services::QuizDraft;

/// Live validity of the link field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkPreview {
    Empty,
    Valid { video_id: String },
    Invalid { expected: &'static str },
}

/// Raw inputs of the "add question" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionForm {
    pub time: String,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
}

impl QuestionForm {
    fn validate(&self, id: QuestionId) -> Result<Question, QuestionError> {
        QuestionDraft {
            time_secs: QuestionDraft::parse_time(&self.time)?,
            text: self.text.clone(),
            options: self.options.clone(),
            correct_index: self.correct_index,
        }
        .validate(id)
    }
}

/// Editable admin state: video link plus the question list, kept sorted by time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminVm {
    kind: VideoKind,
    link: String,
    questions: Vec<Question>,
    pub form: QuestionForm,
}

impl AdminVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill the editor from a stored configuration.
    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        Self {
            kind: config.video().kind(),
            link: config.video().raw_link().to_owned(),
            questions: config.questions().to_vec(),
            form: QuestionForm::default(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> VideoKind {
        self.kind
    }

    /// Switch the video kind. A link typed for the old kind is cleared.
    pub fn select_kind(&mut self, kind: VideoKind) {
        if self.kind != kind {
            self.kind = kind;
            self.link.clear();
        }
    }

    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    #[must_use]
    pub fn link_preview(&self) -> LinkPreview {
        if self.link.trim().is_empty() {
            return LinkPreview::Empty;
        }
        match self.kind.extract_id(&self.link) {
            Some(video_id) => LinkPreview::Valid { video_id },
            None => LinkPreview::Invalid {
                expected: self.kind.expected_format(),
            },
        }
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        matches!(self.link_preview(), LinkPreview::Valid { .. })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Validate the form and insert the question after any with the same time.
    ///
    /// The form is cleared on success and left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if a field is missing or out of range.
    pub fn add_question(&mut self, now_millis: u64) -> Result<QuestionId, QuestionError> {
        let existing: Vec<QuestionId> = self.questions.iter().map(Question::id).collect();
        let id = QuestionId::next_after(&existing, now_millis);
        let question = self.form.validate(id)?;
        let at = self
            .questions
            .partition_point(|existing| existing.time_secs() <= question.time_secs());
        self.questions.insert(at, question);
        self.form = QuestionForm::default();
        Ok(id)
    }

    pub fn remove_question(&mut self, id: QuestionId) {
        self.questions.retain(|q| q.id() != id);
    }

    #[must_use]
    pub fn to_draft(&self) -> QuizDraft {
        QuizDraft {
            kind: self.kind,
            raw_link: self.link.clone(),
            questions: self.questions.clone(),
        }
    }
}

/// Summary of what is currently stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedConfigVm {
    pub kind_label: &'static str,
    pub link: String,
    pub video_id: String,
    pub question_count: usize,
    pub passing_label: String,
}

impl SavedConfigVm {
    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        let video = config.video();
        Self {
            kind_label: video.kind().label(),
            link: video.raw_link().to_owned(),
            video_id: video.resolved_id().to_owned(),
            question_count: config.len(),
            passing_label: format!(
                "{} out of {} ({PASS_THRESHOLD_PERCENT}%)",
                config.passing_score(),
                config.len()
            ),
        }
    }
}

#[must_use]
pub fn question_error_message(err: &QuestionError) -> String {
    match err {
        QuestionError::InvalidTime { .. } => {
            "Please enter the time in seconds (a whole number, 0 or more).".to_string()
        }
        QuestionError::EmptyText => "Please enter the question text.".to_string(),
        QuestionError::EmptyOption { .. } => "Please fill in all four options.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(vm: &mut AdminVm, time: &str, text: &str, correct_index: usize) {
        vm.form = QuestionForm {
            time: time.into(),
            text: text.into(),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index,
        };
    }

    #[test]
    fn preview_tracks_kind_and_link() {
        let mut vm = AdminVm::new();
        assert_eq!(vm.link_preview(), LinkPreview::Empty);
        assert!(!vm.can_save());

        vm.set_link("https://youtu.be/abc123");
        assert_eq!(
            vm.link_preview(),
            LinkPreview::Valid {
                video_id: "abc123".into()
            }
        );
        assert!(vm.can_save());

        vm.set_link("https://www.youtube.com/watch?v=");
        assert_eq!(
            vm.link_preview(),
            LinkPreview::Invalid {
                expected: VideoKind::YouTube.expected_format()
            }
        );
        assert!(!vm.can_save());

        vm.set_link("https://youtu.be/abc123");
        vm.select_kind(VideoKind::GDrive);
        assert_eq!(vm.link(), "");
        assert_eq!(vm.link_preview(), LinkPreview::Empty);
    }

    #[test]
    fn rejects_incomplete_questions() {
        let mut vm = AdminVm::new();
        fill(&mut vm, "", "Q", 0);
        assert!(matches!(
            vm.add_question(1),
            Err(QuestionError::InvalidTime { .. })
        ));
        fill(&mut vm, "5", "  ", 0);
        assert_eq!(vm.add_question(1), Err(QuestionError::EmptyText));
        vm.form.text = "Q".into();
        vm.form.options[2] = String::new();
        assert_eq!(
            vm.add_question(1),
            Err(QuestionError::EmptyOption { index: 2 })
        );
        assert!(vm.questions().is_empty());
        assert_eq!(vm.form.text, "Q");
    }

    #[test]
    fn keeps_questions_sorted_with_unique_ids() {
        let mut vm = AdminVm::new();
        fill(&mut vm, "20", "late", 0);
        let late = vm.add_question(100).unwrap();
        fill(&mut vm, "5", "early", 1);
        let early = vm.add_question(100).unwrap();
        fill(&mut vm, "5", "early twin", 2);
        vm.add_question(100).unwrap();
        assert_ne!(late, early);

        let texts: Vec<&str> = vm.questions().iter().map(Question::text).collect();
        assert_eq!(texts, vec!["early", "early twin", "late"]);
        assert_eq!(vm.form, QuestionForm::default());

        vm.remove_question(early);
        assert_eq!(vm.questions().len(), 2);
        assert_eq!(vm.to_draft().questions.len(), 2);
    }

    #[test]
    fn saved_summary_reports_passing_score() {
        let mut vm = AdminVm::new();
        vm.set_link("https://youtu.be/abc123");
        for t in ["1", "2", "3"] {
            fill(&mut vm, t, "Q", 0);
            vm.add_question(7).unwrap();
        }
        let draft = vm.to_draft();
        let config = QuizConfig::new(
            quiz_core::model::VideoSource::parse(draft.kind, draft.raw_link).unwrap(),
            draft.questions,
        );
        let summary = SavedConfigVm::from_config(&config);
        assert_eq!(summary.kind_label, "YouTube");
        assert_eq!(summary.video_id, "abc123");
        assert_eq!(summary.passing_label, "2 out of 3 (60%)");
    }
}
