//! Managing the signed-in user's categories.

use dioxus::prelude::*;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::service::use_service;

#[component]
pub fn CategoryManager() -> Element {
    let service = use_service();
    let palette = service.config().categories.palette.clone();
    let default_color = service.config().categories.default_color().to_string();
    let mut name = use_signal(String::new);
    let mut color = use_signal(move || default_color.clone());
    let mut log = use_activity_log();

    let mut categories = use_resource({
        let service = service.clone();
        move || {
            let service = service.clone();
            async move { service.list_categories().await }
        }
    });

    let on_create = {
        let service = service.clone();
        move |_| {
            let service = service.clone();
            async move {
                match service.create_category(&name(), Some(&color())).await {
                    Ok(category) => {
                        log_activity(&mut log, LogLevel::Success, &format!("Created {}", category.name));
                        name.set(String::new());
                        categories.restart();
                    }
                    Err(e) => log_activity(&mut log, LogLevel::Warning, &e.to_string()),
                }
            }
        }
    };

    let listing = match &*categories.read() {
        None => rsx! { p { class: "text-sm text-neutral-500", "Loading..." } },
        Some(Err(e)) => rsx! { p { class: "text-sm text-red-700", "{e}" } },
        Some(Ok(list)) => rsx! {
            ul {
                class: "list-none m-0 p-0 flex flex-col gap-2",
                for category in list.iter() {
                    li {
                        key: "{category.id}",
                        class: "flex items-center gap-2",
                        span {
                            class: "w-4 h-4 rounded-full",
                            style: "background-color: {category.color}",
                        }
                        span { class: "mr-auto text-sm", "{category.name}" }
                        button {
                            class: "text-sm text-red-700",
                            onclick: {
                                let service = service.clone();
                                let id = category.id.clone();
                                move |_| {
                                    let service = service.clone();
                                    let id = id.clone();
                                    async move {
                                        match service.delete_category(&id).await {
                                            Ok(()) => categories.restart(),
                                            Err(e) => log_activity(&mut log, LogLevel::Warning, &e.to_string()),
                                        }
                                    }
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "flex flex-col gap-4 p-4",
            h2 { class: "m-0 text-lg font-semibold text-neutral-800", "Categories" }
            {listing}
            div {
                class: "flex gap-2 items-center",
                input {
                    class: "flex-1 bg-white border border-neutral-300 rounded px-3 py-2 text-sm outline-none",
                    placeholder: "New category",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                select {
                    class: "bg-white border border-neutral-300 rounded px-2 py-2 text-sm",
                    value: color(),
                    onchange: move |evt: FormEvent| color.set(evt.value()),
                    for swatch in palette.iter() {
                        option {
                            key: "{swatch}",
                            value: "{swatch}",
                            style: "background-color: {swatch}",
                            "{swatch}"
                        }
                    }
                }
                button {
                    class: "px-3 py-2 text-sm rounded bg-primary-600 text-white",
                    onclick: on_create,
                    "Add"
                }
            }
        }
    }
}
