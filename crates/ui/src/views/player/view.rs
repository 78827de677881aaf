use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::VideoKind;
use services::PlaybackController;
use services::playback::surface_for;
use tracing::debug;

use super::scripts::{
    EvalPort, PLAYER_FRAME_ID, message_listener_script, remove_listener_script,
};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AnswerFeedbackVm, CompletionVm, PlayerIntent, PlayerVm, QuestionOverlayVm, apply_intent,
};

const DRIVE_FRAME_ID: &str = "gdriveplayer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerLoad {
    Ready,
    NotConfigured,
}

#[component]
pub fn PlayerView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_store = ctx.quiz_store();
    let clock = ctx.clock();

    let controller = use_signal(|| None::<PlaybackController>);
    let reload = use_signal(|| 0_u32);

    let resource = use_resource(move || {
        let quiz_store = quiz_store.clone();
        let mut controller = controller;
        async move {
            let Some(config) = quiz_store.load().await? else {
                return Ok(PlayerLoad::NotConfigured);
            };
            let port = EvalPort::new(PLAYER_FRAME_ID);
            let mut next = PlaybackController::new(surface_for(config.video().kind(), port));
            next.begin(config)?;
            controller.set(Some(next));
            Ok::<_, ViewError>(PlayerLoad::Ready)
        }
    });

    // 1 Hz heartbeat: polls the surface and advances the synthetic clock.
    use_future(move || {
        let mut controller = controller;
        async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let now = clock.now();
                if let Some(active) = controller.write().as_mut() {
                    active.tick(now);
                }
            }
        }
    });

    use_future(move || {
        let mut controller = controller;
        async move {
            let mut listener = eval(message_listener_script());
            while let Ok(raw) = listener.recv::<String>().await {
                if let Some(active) = controller.write().as_mut() {
                    active.on_surface_message(&raw);
                }
            }
            debug!("surface message listener closed");
        }
    });

    use_drop(|| {
        let _ = eval(remove_listener_script());
    });

    let dispatch = use_callback(move |intent: PlayerIntent| {
        let mut controller = controller;
        let mut reload = reload;
        let now = clock.now();
        let mut guard = controller.write();
        let Some(active) = guard.as_mut() else {
            return;
        };
        if let Err(err) = apply_intent(active, intent, now) {
            debug!(error = %err, ?intent, "ignored player action");
            return;
        }
        // Opaque players cannot seek, so restarting reloads the iframe.
        if intent == PlayerIntent::Restart && !active.capabilities().accepts_commands {
            reload += 1;
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PlayerTestHandles>() {
                handles.register(dispatch, controller);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let snapshot = controller
        .read()
        .as_ref()
        .and_then(PlayerVm::from_controller);

    rsx! {
        div { class: "page player",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading quiz..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice",
                        h2 { "Quiz Not Ready" }
                        p { "{err.message()}" }
                        Link { to: Route::Admin {}, "Go to Admin Panel" }
                    }
                },
                ViewState::Ready(PlayerLoad::NotConfigured) => rsx! {
                    div { class: "notice",
                        h2 { "No Quiz Configuration Found" }
                        p { "Please configure a video and questions in the Admin Panel first." }
                        Link { to: Route::Admin {}, "Go to Admin Panel" }
                    }
                },
                ViewState::Ready(PlayerLoad::Ready) => match snapshot {
                    Some(vm) => rsx! {
                        PlayerScreen { vm, reload: reload(), dispatch }
                    },
                    None => rsx! {
                        p { "Loading quiz..." }
                    },
                },
            }
        }
    }
}

#[component]
fn PlayerScreen(vm: PlayerVm, reload: u32, dispatch: Callback<PlayerIntent>) -> Element {
    let navigator = use_navigator();
    let frame_id = if vm.kind == VideoKind::YouTube {
        PLAYER_FRAME_ID
    } else {
        DRIVE_FRAME_ID
    };
    let frame_title = format!("{} video player", vm.kind_label);
    let toggle_label = if vm.clock_suspended {
        "Resume"
    } else {
        "I paused the video"
    };

    rsx! {
        header { class: "player-header",
            h2 { "Video Quiz" }
            button {
                class: "secondary",
                onclick: move |_| {
                    navigator.push(Route::Admin {});
                },
                "Admin Panel"
            }
        }

        div { class: "debug-info",
            strong { "Debug Info: " }
            "{vm.debug_label}"
            br {}
            strong { "Timing: " }
            "{vm.timing_label}"
        }

        if let Some(warning) = vm.warning.clone() {
            div { class: "warning-banner", role: "alert",
                span { "{warning}" }
                button {
                    class: "link",
                    onclick: move |_| dispatch.call(PlayerIntent::DismissWarning),
                    "Dismiss"
                }
            }
        }

        div { class: "player-frame",
            VideoFrame {
                key: "{reload}",
                frame_id,
                src: vm.embed_url.clone(),
                title: frame_title,
                on_loaded: move |()| dispatch.call(PlayerIntent::SurfaceLoaded),
            }

            if vm.sequential {
                div { class: "badge sequential", "Sequential viewing required" }
                div { class: "badge watched", "{vm.watched_label}" }
            }

            if let Some(question) = vm.question.clone() {
                QuestionOverlay { question, dispatch }
            }

            if let Some(completion) = vm.completion.clone() {
                CompletionOverlay { completion, dispatch }
            }
        }

        if vm.synthetic_clock {
            div { class: "drive-note",
                p {
                    "Google Drive videos cannot report their playback position. Questions appear "
                    "based on the time since the video loaded, and skipping ahead cannot be "
                    "blocked. Please watch without skipping."
                }
                p { "If you pause the video, tell the quiz so the timer waits for you." }
                button {
                    class: "secondary",
                    onclick: move |_| dispatch.call(PlayerIntent::ToggleClockPause),
                    "{toggle_label}"
                }
            }
        }

        footer { class: "player-footer",
            div { "{vm.progress_label}" }
            div { "{vm.score_label}" }
        }
        div { class: "passing-score", "{vm.passing_label}" }
    }
}

#[component]
fn VideoFrame(
    frame_id: &'static str,
    src: String,
    title: String,
    on_loaded: EventHandler<()>,
) -> Element {
    rsx! {
        iframe {
            id: frame_id,
            src: "{src}",
            title: "{title}",
            width: "100%",
            height: "400",
            allow: "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
            allowfullscreen: true,
            onload: move |_| on_loaded.call(()),
        }
    }
}

fn option_class(index: usize, feedback: Option<&AnswerFeedbackVm>) -> &'static str {
    match feedback {
        Some(feedback) if feedback.chosen_index == index && feedback.was_correct => {
            "option chosen correct"
        }
        Some(feedback) if feedback.chosen_index == index => "option chosen incorrect",
        _ => "option",
    }
}

#[component]
fn QuestionOverlay(question: QuestionOverlayVm, dispatch: Callback<PlayerIntent>) -> Element {
    let revealed = question.feedback.is_some();

    rsx! {
        div { class: "overlay question-overlay",
            div { class: "overlay-body",
                h3 { "{question.heading}" }
                p { class: "question-text", "{question.text}" }
                div { class: "options",
                    for (index, option) in question.options.iter().enumerate() {
                        button {
                            key: "{index}",
                            class: option_class(index, question.feedback.as_ref()),
                            disabled: revealed,
                            onclick: move |_| dispatch.call(PlayerIntent::Answer(index)),
                            "{option}"
                        }
                    }
                }
                if let Some(feedback) = question.feedback.clone() {
                    div {
                        class: if feedback.was_correct { "feedback correct" } else { "feedback incorrect" },
                        "{feedback.message}"
                    }
                    div { class: "running-score", "{feedback.running_score}" }
                    button {
                        class: "primary",
                        onclick: move |_| dispatch.call(PlayerIntent::Continue),
                        "{question.continue_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn CompletionOverlay(completion: CompletionVm, dispatch: Callback<PlayerIntent>) -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "overlay completion-overlay",
            div { class: "overlay-body",
                h2 { "Quiz Complete!" }
                div {
                    class: if completion.passed { "verdict passed" } else { "verdict failed" },
                    "{completion.headline}"
                }
                div { class: "final-score", "{completion.score_label}" }
                div { class: "percentage", "{completion.percentage_label}" }
                p { class: "note", "{completion.note}" }
                div { class: "actions",
                    button {
                        class: "primary",
                        onclick: move |_| dispatch.call(PlayerIntent::Restart),
                        "Restart Quiz"
                    }
                    button {
                        class: "secondary",
                        onclick: move |_| {
                            navigator.push(Route::Admin {});
                        },
                        "Admin Panel"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PlayerTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<PlayerIntent>>>>,
    controller: std::rc::Rc<std::cell::RefCell<Option<Signal<Option<PlaybackController>>>>>,
}

#[cfg(test)]
impl PlayerTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<PlayerIntent>,
        controller: Signal<Option<PlaybackController>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.controller.borrow_mut() = Some(controller);
    }

    pub(crate) fn dispatch(&self) -> Callback<PlayerIntent> {
        (*self.dispatch.borrow()).expect("player dispatch registered")
    }

    pub(crate) fn controller(&self) -> Signal<Option<PlaybackController>> {
        (*self.controller.borrow()).expect("player controller registered")
    }
}
