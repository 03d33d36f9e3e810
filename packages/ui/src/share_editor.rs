//! The "share with" section of the note form.

use dioxus::prelude::*;
use store::SharedUser;

/// Lists the users a note is shared with. Owners can add by username and remove.
#[component]
pub fn ShareEditor(
    users: Vec<SharedUser>,
    editable: bool,
    on_add: EventHandler<String>,
    on_remove: EventHandler<String>,
) -> Element {
    let mut username = use_signal(String::new);

    rsx! {
        div {
            class: "flex flex-col gap-2",
            span { class: "text-sm font-medium text-neutral-800", "Shared with" }
            if users.is_empty() {
                span { class: "text-sm text-neutral-500", "Nobody yet" }
            }
            ul {
                class: "list-none m-0 p-0 flex flex-wrap gap-2",
                for user in users.iter() {
                    li {
                        key: "{user.uid}",
                        class: "flex items-center gap-1 px-2 py-0.5 rounded-full bg-neutral-100 text-sm",
                        "{user.username}"
                        if editable {
                            button {
                                class: "text-neutral-500",
                                title: "Stop sharing",
                                onclick: {
                                    let uid = user.uid.clone();
                                    move |_| on_remove.call(uid.clone())
                                },
                                "x"
                            }
                        }
                    }
                }
            }
            if editable {
                div {
                    class: "flex gap-2",
                    input {
                        class: "flex-1 bg-white border border-neutral-300 rounded px-3 py-2 text-sm outline-none",
                        placeholder: "Username",
                        value: username(),
                        oninput: move |evt: FormEvent| username.set(evt.value()),
                    }
                    button {
                        class: "px-3 py-2 text-sm border border-neutral-300 rounded",
                        onclick: move |_| {
                            on_add.call(username());
                            username.set(String::new());
                        },
                        "Add"
                    }
                }
            }
        }
    }
}
