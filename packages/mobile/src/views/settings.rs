use dioxus::prelude::*;
use ui::{CategoryManager, ProfileForm};

#[component]
pub fn Categories() -> Element {
    rsx! {
        div {
            class: "max-w-3xl mx-auto w-full",
            CategoryManager {}
        }
    }
}

#[component]
pub fn Profile() -> Element {
    rsx! {
        div {
            class: "max-w-3xl mx-auto w-full",
            ProfileForm {}
        }
    }
}
