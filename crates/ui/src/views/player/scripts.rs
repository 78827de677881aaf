use dioxus::document::eval;
use services::MessagePort;

/// Element id of the YouTube iframe.
pub(crate) const PLAYER_FRAME_ID: &str = "ytplayer";

/// Posts player commands into the iframe through `window.postMessage`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EvalPort {
    frame_id: &'static str,
}

impl EvalPort {
    pub(crate) const fn new(frame_id: &'static str) -> Self {
        Self { frame_id }
    }
}

impl MessagePort for EvalPort {
    fn post(&mut self, message: &str) {
        let _ = eval(&post_message_script(self.frame_id, message));
    }
}

pub(super) fn post_message_script(frame_id: &str, message: &str) -> String {
    format!(
        r#"(function() {{
                const frame = document.getElementById({frame_id:?});
                if (frame && frame.contentWindow) {{
                    frame.contentWindow.postMessage({message:?}, "*");
                }}
            }})();"#
    )
}

/// Forwards YouTube `message` events to Rust via `dioxus.send`.
pub(super) fn message_listener_script() -> &'static str {
    r#"
        if (window.__videoQuizListener) {
            window.removeEventListener("message", window.__videoQuizListener);
        }
        const handler = (event) => {
            if (typeof event.origin !== "string" || !event.origin.includes("youtube.com")) {
                return;
            }
            const data = typeof event.data === "string" ? event.data : JSON.stringify(event.data);
            dioxus.send(data);
        };
        window.__videoQuizListener = handler;
        window.addEventListener("message", handler);
        await new Promise(() => {});
    "#
}

pub(super) fn remove_listener_script() -> &'static str {
    r#"
        if (window.__videoQuizListener) {
            window.removeEventListener("message", window.__videoQuizListener);
            window.__videoQuizListener = null;
        }
    "#
}
