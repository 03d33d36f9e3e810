use dioxus::prelude::*;
use ui::{LoginForm, RegisterForm};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "max-w-sm mx-auto w-full px-6 py-12 flex flex-col gap-6",
            h1 { class: "m-0 text-2xl font-bold text-neutral-800", "Login" }
            LoginForm {
                on_success: move |_| {
                    nav.replace(Route::Notes {});
                },
            }
            p {
                class: "m-0 text-sm text-neutral-600",
                "No account yet? "
                Link { class: "text-primary-600", to: Route::Register {}, "Register" }
            }
        }
    }
}

#[component]
pub fn Register() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "max-w-sm mx-auto w-full px-6 py-12 flex flex-col gap-6",
            h1 { class: "m-0 text-2xl font-bold text-neutral-800", "Register" }
            RegisterForm {
                on_success: move |_| {
                    nav.replace(Route::Profile {});
                },
            }
            p {
                class: "m-0 text-sm text-neutral-600",
                "Already registered? "
                Link { class: "text-primary-600", to: Route::Login {}, "Login" }
            }
        }
    }
}
