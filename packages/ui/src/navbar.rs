use dioxus::prelude::*;

/// Top bar holding navigation links and actions.
#[component]
pub fn Navbar(title: String, children: Element) -> Element {
    rsx! {
        header {
            class: "flex items-center gap-4 px-4 py-3 bg-white border-b border-neutral-300",
            h1 { class: "m-0 mr-auto text-lg font-semibold text-neutral-800", "{title}" }
            {children}
        }
    }
}
