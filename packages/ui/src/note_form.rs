//! Create and edit form for a single note, driven by
//! [`store::NoteEditorViewModel`].
//!
//! The view model lives in a signal. Async actions take it out, run, and put it
//! back, so no borrow is held across an await; while an action runs the form
//! shows as busy.

use dioxus::prelude::*;
use store::{AuthSession, Category, NoteDraft, NoteEditorViewModel};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::picker::UrlPicker;
use crate::service::use_service;
use crate::share_editor::ShareEditor;

type Editor = NoteEditorViewModel<api::RemoteBackend, AuthSession>;

const INPUT_CLASS: &str = "w-full mt-1.5 bg-white border border-neutral-300 rounded px-3 py-2 text-sm outline-none focus:border-primary-500";

/// Snapshot of what the form renders.
struct FormView {
    draft: NoteDraft,
    categories: Vec<Category>,
    editable: bool,
    is_new: bool,
    message: Option<String>,
}

impl FormView {
    fn of(editor: &Editor) -> Self {
        Self {
            draft: editor.draft().clone(),
            categories: editor.categories().to_vec(),
            editable: editor.editable(),
            is_new: editor.note_id().is_none(),
            message: editor.message().map(str::to_string),
        }
    }
}

/// `note_id: None` opens an empty form. `on_done` fires after a save or delete.
#[component]
pub fn NoteForm(note_id: Option<String>, on_done: EventHandler<()>) -> Element {
    let service = use_service();
    let mut editor = use_signal(|| Option::<Editor>::None);
    let mut load_error = use_signal(|| Option::<String>::None);
    let mut image_input = use_signal(String::new);
    let mut log = use_activity_log();

    // Reload whenever the route hands us a different note.
    let _loader = use_resource(use_reactive!(|(note_id,)| {
        let service = service.clone();
        async move {
            let loaded = match note_id {
                Some(id) => Editor::load(service, &id).await,
                None => Editor::new(service).await,
            };
            match loaded {
                Ok(view_model) => {
                    editor.set(Some(view_model));
                    load_error.set(None);
                }
                Err(e) => {
                    log_activity(&mut log, LogLevel::Error, &e.to_string());
                    load_error.set(Some(e.to_string()));
                }
            }
        }
    }));

    let on_save = move |_| async move {
        let Some(mut view_model) = editor.write().take() else {
            return;
        };
        let saved = view_model.save().await;
        editor.set(Some(view_model));
        match saved {
            Ok(note) => {
                log_activity(&mut log, LogLevel::Success, &format!("Saved \"{}\"", note.title));
                on_done.call(());
            }
            Err(e) => log_activity(&mut log, LogLevel::Warning, &e.to_string()),
        }
    };

    let on_delete = move |_| async move {
        let Some(mut view_model) = editor.write().take() else {
            return;
        };
        let deleted = view_model.delete().await;
        editor.set(Some(view_model));
        match deleted {
            Ok(()) => {
                log_activity(&mut log, LogLevel::Success, "Note deleted");
                on_done.call(());
            }
            Err(e) => log_activity(&mut log, LogLevel::Warning, &e.to_string()),
        }
    };

    let on_add_share = move |username: String| async move {
        let Some(mut view_model) = editor.write().take() else {
            return;
        };
        let added = view_model.add_share(&username).await;
        editor.set(Some(view_model));
        if let Err(e) = added {
            log_activity(&mut log, LogLevel::Warning, &e.to_string());
        }
    };

    let on_remove_share = move |uid: String| {
        if let Some(view_model) = editor.write().as_mut() {
            view_model.remove_share(&uid);
        }
    };

    let on_add_images = move |_| async move {
        let Some(mut view_model) = editor.write().take() else {
            return;
        };
        let picker = UrlPicker::new(image_input());
        let picked = view_model.pick_images(&picker).await;
        editor.set(Some(view_model));
        match picked {
            Ok(_) => image_input.set(String::new()),
            Err(e) => log_activity(&mut log, LogLevel::Warning, &e.to_string()),
        }
    };

    if let Some(message) = load_error() {
        return rsx! {
            p { class: "p-4 text-sm text-red-700", "{message}" }
        };
    }

    let Some(view) = editor.read().as_ref().map(FormView::of) else {
        return rsx! {
            p { class: "p-4 text-sm text-neutral-500", "Loading..." }
        };
    };
    let FormView {
        draft,
        categories,
        editable,
        is_new,
        message,
    } = view;
    let selected_category = draft.category_id.clone().unwrap_or_default();

    rsx! {
        div {
            class: "flex flex-col gap-4 p-4",
            h2 {
                class: "m-0 text-lg font-semibold text-neutral-800",
                if is_new { "New note" } else if editable { "Edit note" } else { "Shared note" }
            }
            if !editable {
                p { class: "m-0 text-sm text-neutral-500", "Only the owner can change this note." }
            }

            label {
                class: "text-sm font-medium text-neutral-800",
                "Title"
                input {
                    class: INPUT_CLASS,
                    disabled: !editable,
                    value: "{draft.title}",
                    oninput: move |evt: FormEvent| {
                        if let Some(view_model) = editor.write().as_mut() {
                            view_model.draft_mut().title = evt.value();
                        }
                    },
                }
            }

            label {
                class: "text-sm font-medium text-neutral-800",
                "Description"
                textarea {
                    class: "{INPUT_CLASS} min-h-32",
                    disabled: !editable,
                    value: "{draft.description}",
                    oninput: move |evt: FormEvent| {
                        if let Some(view_model) = editor.write().as_mut() {
                            view_model.draft_mut().description = evt.value();
                        }
                    },
                }
            }

            label {
                class: "text-sm font-medium text-neutral-800",
                "Category"
                select {
                    class: INPUT_CLASS,
                    disabled: !editable,
                    value: "{selected_category}",
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        if let Some(view_model) = editor.write().as_mut() {
                            view_model.draft_mut().category_id = (!value.is_empty()).then_some(value);
                        }
                    },
                    option { value: "", "Choose a category" }
                    for category in categories.iter() {
                        option {
                            key: "{category.id}",
                            value: "{category.id}",
                            selected: category.id == selected_category,
                            "{category.name}"
                        }
                    }
                }
            }

            div {
                class: "flex flex-col gap-2",
                span { class: "text-sm font-medium text-neutral-800", "Images" }
                ul {
                    class: "list-none m-0 p-0 flex flex-wrap gap-2",
                    for uri in draft.images.iter() {
                        li {
                            key: "{uri}",
                            class: "relative",
                            img { class: "w-20 h-20 object-cover rounded", src: "{uri}" }
                            if editable {
                                button {
                                    class: "absolute top-0 right-0 px-1 bg-white/80 text-xs",
                                    onclick: {
                                        let uri = uri.clone();
                                        move |_| {
                                            if let Some(view_model) = editor.write().as_mut() {
                                                view_model.draft_mut().remove_image(&uri);
                                            }
                                        }
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
                            placeholder: "Image URLs",
                            value: image_input(),
                            oninput: move |evt: FormEvent| image_input.set(evt.value()),
                        }
                        button {
                            class: "px-3 py-2 text-sm border border-neutral-300 rounded",
                            onclick: on_add_images,
                            "Add images"
                        }
                    }
                }
            }

            ShareEditor {
                users: draft.share.users().to_vec(),
                editable,
                on_add: on_add_share,
                on_remove: on_remove_share,
            }

            if let Some(message) = message {
                p { class: "m-0 text-sm text-neutral-600", "{message}" }
            }

            if editable {
                div {
                    class: "flex gap-2",
                    button {
                        class: "px-4 py-2 rounded bg-primary-600 text-white text-sm font-medium",
                        onclick: on_save,
                        "Save"
                    }
                    if !is_new {
                        button {
                            class: "px-4 py-2 rounded border border-red-300 text-red-700 text-sm",
                            onclick: on_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
