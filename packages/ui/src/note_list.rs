//! The note list: every note the user owns or has been shared, with its
//! category and whether it can be edited.

use dioxus::prelude::*;
use store::{LoadStatus, NoteCard, NotesViewModel, NotesViewState};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::auth::use_auth;
use crate::service::use_service;

/// Loads on mount and whenever the signed-in user changes. `Refresh` reloads.
#[component]
pub fn NoteList(on_open: EventHandler<String>, on_new: EventHandler<()>) -> Element {
    let service = use_service();
    let auth = use_auth();
    let mut log = use_activity_log();

    let mut notes = use_resource(move || {
        let service = service.clone();
        async move {
            // Subscribe to sign-in changes.
            let _user = auth().user;
            let mut view_model = NotesViewModel::new(service);
            let state = view_model.refresh().await.clone();
            if let LoadStatus::Failed(message) = &state.status {
                log_activity(&mut log, LogLevel::Error, message);
            }
            state
        }
    });

    let state: Option<NotesViewState> = notes.cloned();

    rsx! {
        div {
            class: "flex items-center gap-2 px-4 py-3",
            h2 { class: "m-0 mr-auto text-base font-semibold text-neutral-800", "Notes" }
            button {
                class: "px-3 py-1.5 text-sm border border-neutral-300 rounded",
                onclick: move |_| notes.restart(),
                "Refresh"
            }
            button {
                class: "px-3 py-1.5 text-sm rounded bg-primary-600 text-white",
                onclick: move |_| on_new.call(()),
                "New note"
            }
        }
        match state {
            None => rsx! {
                p { class: "px-4 text-sm text-neutral-500", "Loading..." }
            },
            Some(NotesViewState { status: LoadStatus::SignedOut, .. }) => rsx! {
                p { class: "px-4 text-sm text-neutral-500", "Sign in to see your notes." }
            },
            Some(NotesViewState { status, cards }) => rsx! {
                if let LoadStatus::Failed(message) = status {
                    p { class: "px-4 text-sm text-red-700", "Could not load notes: {message}" }
                }
                if cards.is_empty() {
                    p { class: "px-4 text-sm text-neutral-500", "No notes yet." }
                }
                ul {
                    class: "list-none m-0 px-4 flex flex-col gap-3",
                    for card in cards.iter() {
                        NoteCardView {
                            key: "{card.note.id}",
                            card: card.clone(),
                            on_open,
                        }
                    }
                }
            },
        }
    }
}

/// One note in the list.
#[component]
pub fn NoteCardView(card: NoteCard, on_open: EventHandler<String>) -> Element {
    let note = &card.note;
    let id = note.id.clone();
    let created = note
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    rsx! {
        li {
            class: "p-4 bg-white border border-neutral-200 rounded shadow-sm cursor-pointer",
            onclick: move |_| on_open.call(id.clone()),
            div {
                class: "flex items-center gap-2 mb-1",
                h3 { class: "m-0 mr-auto text-base font-semibold text-neutral-800", "{note.title}" }
                if let Some(category) = &card.category {
                    span {
                        class: "px-2 py-0.5 rounded-full text-xs text-neutral-800",
                        style: "background-color: {category.color}",
                        "{category.name}"
                    }
                }
            }
            p { class: "m-0 text-sm text-neutral-700 line-clamp-3", "{note.description}" }
            div {
                class: "flex gap-3 mt-2 text-xs text-neutral-500",
                if card.editable {
                    if !note.shared_with.is_empty() {
                        span { "Shared with {note.shared_with.len()}" }
                    }
                } else {
                    span { "Shared by {note.owner_display_name}" }
                }
                if !note.images.is_empty() {
                    span { "{note.images.len()} images" }
                }
                span { class: "ml-auto", "{created}" }
            }
        }
    }
}
