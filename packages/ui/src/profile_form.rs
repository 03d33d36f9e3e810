//! The signed-in user's profile: username (what others share with), bio and
//! picture.

use dioxus::prelude::*;
use store::{ProfileDraft, ProfileImage};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::service::use_service;

/// A freshly picked file wins over the URL field. A blank URL clears the picture.
fn chosen_image(pending: Option<Vec<u8>>, url: &str) -> Option<ProfileImage> {
    match pending {
        Some(bytes) => Some(ProfileImage::Pending(bytes)),
        None => {
            let url = url.trim();
            (!url.is_empty()).then(|| ProfileImage::Remote(url.to_string()))
        }
    }
}

const INPUT_CLASS: &str = "w-full mt-1.5 bg-white border border-neutral-300 rounded px-3 py-2 text-sm outline-none focus:border-primary-500";

#[component]
pub fn ProfileForm() -> Element {
    let service = use_service();
    let mut username = use_signal(String::new);
    let mut bio = use_signal(String::new);
    let mut image_url = use_signal(String::new);
    // Name and bytes of a picture picked on this device, uploaded on save.
    let mut picked = use_signal(|| Option::<(String, Vec<u8>)>::None);
    let mut saving = use_signal(|| false);
    let mut log = use_activity_log();

    let _loader = use_resource({
        let service = service.clone();
        move || {
            let service = service.clone();
            async move {
                match service.get_profile().await {
                    Ok(Some(profile)) => {
                        let draft = ProfileDraft::from_profile(&profile);
                        username.set(draft.username);
                        bio.set(draft.bio);
                        if let Some(ProfileImage::Remote(url)) = draft.image {
                            image_url.set(url);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => log_activity(&mut log, LogLevel::Error, &e.to_string()),
                }
            }
        }
    });

    let on_save = move |_| {
        let service = service.clone();
        async move {
            saving.set(true);
            let pending = picked.peek().as_ref().map(|(_, bytes)| bytes.clone());
            let draft = ProfileDraft {
                username: username(),
                bio: bio(),
                image: chosen_image(pending, &image_url()),
            };
            match service.save_profile(draft).await {
                Ok(profile) => {
                    username.set(profile.username);
                    image_url.set(profile.image_uri.unwrap_or_default());
                    picked.set(None);
                    log_activity(&mut log, LogLevel::Success, "Profile saved");
                }
                Err(e) => log_activity(&mut log, LogLevel::Warning, &e.to_string()),
            }
            saving.set(false);
        }
    };

    let on_pick = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => picked.set(Some((file.name(), bytes.to_vec()))),
            Err(e) => log_activity(
                &mut log,
                LogLevel::Warning,
                &format!("Could not read {}: {}", file.name(), e),
            ),
        }
    };

    let picked_name = picked.read().as_ref().map(|(name, _)| name.clone());

    rsx! {
        div {
            class: "flex flex-col gap-4 p-4",
            h2 { class: "m-0 text-lg font-semibold text-neutral-800", "Profile" }
            if !image_url().trim().is_empty() {
                img { class: "w-24 h-24 rounded-full object-cover", src: "{image_url}" }
            }
            label {
                class: "text-sm font-medium text-neutral-800",
                "Username"
                input {
                    class: INPUT_CLASS,
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
            }
            label {
                class: "text-sm font-medium text-neutral-800",
                "Bio"
                textarea {
                    class: "{INPUT_CLASS} min-h-24",
                    value: bio(),
                    oninput: move |evt: FormEvent| bio.set(evt.value()),
                }
            }
            label {
                class: "text-sm font-medium text-neutral-800",
                "Picture"
                input {
                    class: "block mt-1.5 text-sm",
                    r#type: "file",
                    accept: "image/*",
                    multiple: false,
                    onchange: on_pick,
                }
            }
            if let Some(name) = picked_name {
                p { class: "m-0 text-sm text-neutral-600", "{name} will be uploaded on save" }
            } else {
                label {
                    class: "text-sm font-medium text-neutral-800",
                    "Picture URL"
                    input {
                        class: INPUT_CLASS,
                        value: image_url(),
                        oninput: move |evt: FormEvent| image_url.set(evt.value()),
                    }
                }
            }
            button {
                class: "self-start px-4 py-2 rounded bg-primary-600 text-white text-sm font-medium disabled:opacity-50",
                disabled: saving(),
                onclick: on_save,
                if saving() { "Saving..." } else { "Save" }
            }
        }
    }
}
