use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

const STYLESHEET: Asset = asset!("/assets/style.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: STYLESHEET }
        document::Title { "Video Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! { FatalError { details: format!("{errors:?}") } },
                Router::<Route> {}
            }
        }
    }
}

/// Last-resort screen when a view panics its render.
#[component]
fn FatalError(details: String) -> Element {
    rsx! {
        div { class: "notice fatal", role: "alert",
            h1 { "The quiz stopped unexpectedly" }
            p { "Restart the app. Your saved quiz configuration is not affected." }
            details {
                summary { "Technical details" }
                pre { "{details}" }
            }
        }
    }
}
