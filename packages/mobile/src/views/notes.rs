use dioxus::prelude::*;
use ui::{NoteForm, NoteList};

use crate::Route;

#[component]
pub fn Notes() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "max-w-3xl mx-auto w-full",
            NoteList {
                on_open: move |note_id: String| {
                    nav.push(Route::EditNote { note_id });
                },
                on_new: move |_| {
                    nav.push(Route::NewNote {});
                },
            }
        }
    }
}

#[component]
pub fn NewNote() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "max-w-3xl mx-auto w-full",
            NoteForm {
                on_done: move |_| {
                    nav.replace(Route::Notes {});
                },
            }
        }
    }
}

/// Opens read-only when the note was shared with, not owned by, the user.
#[component]
pub fn EditNote(note_id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "max-w-3xl mx-auto w-full",
            NoteForm {
                note_id,
                on_done: move |_| {
                    nav.replace(Route::Notes {});
                },
            }
        }
    }
}
