use dioxus::prelude::*;

use crate::views::AssessmentView;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "CyberWave Assessment Portal" }

        // Context menu stays off while the assessment window is open.
        div {
            class: "app-root",
            oncontextmenu: move |evt| evt.prevent_default(),
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                AssessmentView {}
            }
        }
    }
}
