use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let entries = log().entries.clone();

    rsx! {
        div {
            class: "fixed inset-x-0 bottom-0 max-h-[40vh] overflow-y-auto bg-white border-t border-neutral-300 shadow-lg text-sm",
            div {
                class: "flex items-center justify-between px-4 py-2 border-b border-neutral-200 font-semibold",
                span { "Activity" }
                div {
                    class: "flex gap-3",
                    button {
                        onclick: move |_| {
                            let mut log = log.write();
                            log.entries.clear();
                            log.seen = 0;
                        },
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                class: "px-4 py-2",
                for entry in entries.iter().rev() {
                    div {
                        class: match entry.level {
                            LogLevel::Error => "py-1 text-red-700",
                            LogLevel::Warning => "py-1 text-amber-700",
                            LogLevel::Success => "py-1 text-green-700",
                            LogLevel::Info => "py-1 text-neutral-700",
                        },
                        span { class: "text-neutral-500 mr-2", "{entry.timestamp}" }
                        span { "{entry.message}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log().entries.len();
    let has_errors = log().entries.iter().any(|e| e.level == LogLevel::Error);

    rsx! {
        button {
            class: if has_errors { "px-2 text-red-700" } else { "px-2 text-neutral-600" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Activity",
            if count > 0 {
                "{count}"
            } else {
                "Log"
            }
        }
    }
}

/// One-line notice for the newest unseen warning or error.
#[component]
pub fn ActivityBanner() -> Element {
    let mut log = use_activity_log();

    let Some(problem) = log.read().latest_problem().cloned() else {
        return rsx! {};
    };
    if log.read().visible {
        return rsx! {};
    }

    rsx! {
        div {
            class: match problem.level {
                LogLevel::Error => "flex items-center gap-3 px-4 py-2 text-sm bg-red-50 text-red-700",
                _ => "flex items-center gap-3 px-4 py-2 text-sm bg-amber-50 text-amber-700",
            },
            span { class: "mr-auto", "{problem.message}" }
            button {
                onclick: move |_| log.write().visible = true,
                "Details"
            }
            button {
                onclick: move |_| log.write().dismiss(),
                "Dismiss"
            }
        }
    }
}
