use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::{OPTION_COUNT, Question, QuestionId, VideoKind};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AdminVm, LinkPreview, SavedConfigVm, question_error_message};

#[derive(Clone, Debug, PartialEq, Eq)]
enum SaveFeedback {
    Saved { warnings: Vec<String> },
    Cleared,
    Failed(String),
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_store = ctx.quiz_store();
    let clock = ctx.clock();

    let mut vm = use_signal(AdminVm::new);
    let mut form_error = use_signal(|| None::<String>);
    let feedback = use_signal(|| None::<SaveFeedback>);
    let saved = use_signal(|| None::<SavedConfigVm>);
    let mut confirm_clear = use_signal(|| false);

    let resource = {
        let quiz_store = quiz_store.clone();
        use_resource(move || {
            let quiz_store = quiz_store.clone();
            let mut vm = vm;
            let mut saved = saved;
            async move {
                if let Some(config) = quiz_store.load().await? {
                    vm.set(AdminVm::from_config(&config));
                    saved.set(Some(SavedConfigVm::from_config(&config)));
                }
                Ok::<_, ViewError>(())
            }
        })
    };

    let on_save = {
        let quiz_store = quiz_store.clone();
        use_callback(move |()| {
            let quiz_store = quiz_store.clone();
            let draft = vm.read().to_draft();
            let mut saved = saved;
            let mut feedback = feedback;
            spawn(async move {
                match quiz_store.save(draft).await {
                    Ok(result) => {
                        saved.set(Some(SavedConfigVm::from_config(&result.config)));
                        feedback.set(Some(SaveFeedback::Saved {
                            warnings: result.warnings.iter().map(ToString::to_string).collect(),
                        }));
                    }
                    Err(err) => {
                        feedback.set(Some(SaveFeedback::Failed(ViewError::from(err).message())));
                    }
                }
            });
        })
    };

    let on_clear = use_callback(move |()| {
        let quiz_store = quiz_store.clone();
        let mut vm = vm;
        let mut saved = saved;
        let mut feedback = feedback;
        let mut confirm_clear = confirm_clear;
        spawn(async move {
            match quiz_store.clear().await {
                Ok(()) => {
                    vm.set(AdminVm::new());
                    saved.set(None);
                    feedback.set(Some(SaveFeedback::Cleared));
                }
                Err(err) => {
                    feedback.set(Some(SaveFeedback::Failed(ViewError::from(err).message())));
                }
            }
            confirm_clear.set(false);
        });
    });

    let on_add = use_callback(move |()| {
        let now_millis = clock.now_millis();
        let added = vm.write().add_question(now_millis);
        match added {
            Ok(_) => form_error.set(None),
            Err(err) => form_error.set(Some(question_error_message(&err))),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AdminTestHandles>() {
                handles.register(vm, on_save, on_clear);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let current = vm.read().clone();
    let kind = current.kind();
    let link_label = format!("{} Video URL:", kind.label());
    let link_hint = match kind {
        VideoKind::YouTube => "Enter a YouTube video URL",
        VideoKind::GDrive => {
            "Enter a Google Drive shareable link to a video file (make sure it is publicly accessible)"
        }
    };

    rsx! {
        div { class: "page admin",
            header { class: "admin-header",
                h2 { "Quiz Admin Panel" }
                Link { to: Route::Player {}, "Go to Quiz" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    section { class: "card",
                        h3 { "Video Configuration" }
                        label { r#for: "video-kind", "Video Type:" }
                        select {
                            id: "video-kind",
                            value: kind.as_str(),
                            onchange: move |evt: FormEvent| {
                                if let Some(kind) = VideoKind::from_wire(&evt.value()) {
                                    vm.write().select_kind(kind);
                                }
                            },
                            for option_kind in VideoKind::ALL {
                                option {
                                    key: "{option_kind.as_str()}",
                                    value: option_kind.as_str(),
                                    selected: option_kind == kind,
                                    "{option_kind.label()}"
                                }
                            }
                        }

                        label { r#for: "video-link", "{link_label}" }
                        input {
                            id: "video-link",
                            r#type: "text",
                            value: current.link().to_string(),
                            placeholder: kind.expected_format(),
                            oninput: move |evt: FormEvent| vm.write().set_link(evt.value()),
                        }
                        p { class: "hint", "{link_hint}" }
                        LinkPreviewPanel { kind, preview: current.link_preview() }
                    }

                    section { class: "card",
                        h3 { "Add New Question" }
                        label { r#for: "question-time", "Time (seconds):" }
                        input {
                            id: "question-time",
                            r#type: "number",
                            min: "0",
                            value: current.form.time.clone(),
                            placeholder: "e.g., 30",
                            oninput: move |evt: FormEvent| vm.write().form.time = evt.value(),
                        }
                        label { r#for: "question-text", "Question:" }
                        input {
                            id: "question-text",
                            r#type: "text",
                            value: current.form.text.clone(),
                            placeholder: "Enter your question here",
                            oninput: move |evt: FormEvent| vm.write().form.text = evt.value(),
                        }
                        label { "Options:" }
                        for index in 0..OPTION_COUNT {
                            div { key: "{index}", class: "option-row",
                                input {
                                    r#type: "radio",
                                    name: "correct-answer",
                                    checked: current.form.correct_index == index,
                                    onchange: move |_| vm.write().form.correct_index = index,
                                }
                                input {
                                    r#type: "text",
                                    value: current.form.options[index].clone(),
                                    placeholder: format!("Option {}", index + 1),
                                    oninput: move |evt: FormEvent| vm.write().form.options[index] = evt.value(),
                                }
                            }
                        }
                        p { class: "hint", "Select the radio button next to the correct answer" }
                        if let Some(message) = form_error() {
                            p { class: "error", "{message}" }
                        }
                        button {
                            class: "primary",
                            onclick: move |_| on_add.call(()),
                            "Add Question"
                        }
                    }

                    section { class: "card",
                        h3 { "Questions ({current.questions().len()})" }
                        if current.questions().is_empty() {
                            p { class: "muted", "No questions added yet." }
                        }
                        for (index, question) in current.questions().iter().enumerate() {
                            QuestionCard {
                                key: "{question.id()}",
                                number: index + 1,
                                question: question.clone(),
                                on_remove: move |id: QuestionId| vm.write().remove_question(id),
                            }
                        }
                    }

                    div { class: "save-row",
                        button {
                            class: "primary",
                            disabled: !current.can_save(),
                            onclick: move |_| on_save.call(()),
                            "Save Quiz Configuration"
                        }
                    }

                    FeedbackPanel { feedback: feedback() }

                    if let Some(summary) = saved() {
                        section { class: "card saved-config",
                            h3 { "Current Saved Configuration" }
                            p { strong { "Video Type: " } "{summary.kind_label}" }
                            p { strong { "Video: " } "{summary.link}" }
                            p { strong { "Video ID: " } "{summary.video_id}" }
                            p { strong { "Questions: " } "{summary.question_count}" }
                            p { strong { "Passing Score: " } "{summary.passing_label}" }
                            if confirm_clear() {
                                p { class: "warning",
                                    "Are you sure you want to clear all quiz data? This cannot be undone."
                                }
                                button {
                                    class: "danger",
                                    onclick: move |_| on_clear.call(()),
                                    "Yes, clear everything"
                                }
                                button {
                                    class: "secondary",
                                    onclick: move |_| confirm_clear.set(false),
                                    "Cancel"
                                }
                            } else {
                                button {
                                    class: "danger",
                                    onclick: move |_| confirm_clear.set(true),
                                    "Clear All Data"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn LinkPreviewPanel(kind: VideoKind, preview: LinkPreview) -> Element {
    match preview {
        LinkPreview::Empty => rsx! {},
        LinkPreview::Valid { video_id } => rsx! {
            div { class: "preview valid",
                p { "Valid {kind.label()} URL detected" }
                p { "Video ID: {video_id}" }
                if !kind.capabilities().can_enforce_sequential() {
                    p { class: "note",
                        "Note: this player cannot report its position. Questions follow elapsed "
                        "time and skipping ahead cannot be blocked."
                    }
                }
            }
        },
        LinkPreview::Invalid { expected } => rsx! {
            p { class: "preview invalid", "Please enter a valid {kind.label()} URL ({expected})" }
        },
    }
}

#[component]
fn QuestionCard(number: usize, question: Question, on_remove: EventHandler<QuestionId>) -> Element {
    let id = question.id();
    let correct_index = question.correct_index();

    rsx! {
        div { class: "question-card",
            div { class: "question-body",
                h4 { "Question {number} (at {question.time_secs()}s)" }
                p { "{question.text()}" }
                ul {
                    for (index, option) in question.options().iter().enumerate() {
                        li {
                            key: "{index}",
                            class: if index == correct_index { "correct" } else { "" },
                            "{option}"
                            if index == correct_index {
                                " ✓"
                            }
                        }
                    }
                }
            }
            button {
                class: "danger",
                onclick: move |_| on_remove.call(id),
                "Remove"
            }
        }
    }
}

#[component]
fn FeedbackPanel(feedback: Option<SaveFeedback>) -> Element {
    match feedback {
        None => rsx! {},
        Some(SaveFeedback::Saved { warnings }) => rsx! {
            div { class: "feedback success",
                p { "Quiz data saved successfully!" }
                for warning in warnings {
                    p { class: "warning", "{warning}" }
                }
            }
        },
        Some(SaveFeedback::Cleared) => rsx! {
            div { class: "feedback success",
                p { "Quiz data cleared successfully!" }
            }
        },
        Some(SaveFeedback::Failed(message)) => rsx! {
            div { class: "feedback error", role: "alert",
                p { "{message}" }
            }
        },
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AdminTestHandles {
    vm: std::rc::Rc<std::cell::RefCell<Option<Signal<AdminVm>>>>,
    save: std::rc::Rc<std::cell::RefCell<Option<Callback<()>>>>,
    clear: std::rc::Rc<std::cell::RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl AdminTestHandles {
    pub(crate) fn register(&self, vm: Signal<AdminVm>, save: Callback<()>, clear: Callback<()>) {
        *self.vm.borrow_mut() = Some(vm);
        *self.save.borrow_mut() = Some(save);
        *self.clear.borrow_mut() = Some(clear);
    }

    pub(crate) fn vm(&self) -> Signal<AdminVm> {
        (*self.vm.borrow()).expect("admin vm registered")
    }

    pub(crate) fn save(&self) -> Callback<()> {
        (*self.save.borrow()).expect("admin save registered")
    }

    pub(crate) fn clear(&self) -> Callback<()> {
        (*self.clear.borrow()).expect("admin clear registered")
    }
}
