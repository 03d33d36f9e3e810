//! Authentication context, hooks and forms.
//!
//! [`AuthProvider`] asks the server who is signed in, keeps the answer in an
//! [`AuthState`] signal for rendering, and mirrors it into the
//! [`store::AuthSession`] that services read their identity from.

use api::UserInfo;
use dioxus::prelude::*;
use store::AuthSession;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The identity handle shared with every service.
pub fn use_auth_session() -> AuthSession {
    use_context::<AuthSession>()
}

/// Record a sign-in (`Some`) or sign-out (`None`) in both the UI state and the session.
pub fn set_signed_in(auth_state: &mut Signal<AuthState>, session: &AuthSession, user: Option<UserInfo>) {
    match &user {
        Some(info) => session.sign_in(info.to_current_user()),
        None => session.sign_out(),
    }
    auth_state.set(AuthState {
        user,
        loading: false,
    });
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let session = use_context_provider(AuthSession::signed_out);

    // Follow the session: any sign-out, from the logout button or elsewhere,
    // clears the rendered user.
    let _watcher = use_future({
        let session = session.clone();
        move || {
            let mut transitions = session.subscribe();
            async move {
                while transitions.changed().await.is_ok() {
                    let signed_out = transitions.borrow_and_update().is_none();
                    if signed_out && auth_state.peek().user.is_some() {
                        auth_state.set(AuthState {
                            user: None,
                            loading: false,
                        });
                    }
                }
            }
        }
    });

    // Fetch the current user on mount
    let _ = use_resource(move || {
        let session = session.clone();
        async move {
            let user = match api::get_current_user().await {
                Ok(user) => user,
                Err(e) => {
                    tracing::error!("Failed to fetch current user: {}", e);
                    None
                }
            };
            set_signed_in(&mut auth_state, &session, user);
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

const INPUT_CLASS: &str = "w-full mt-1.5 bg-white border border-neutral-300 rounded px-3 py-2 text-sm outline-none focus:border-primary-500";
const BUTTON_CLASS: &str = "px-4 py-2 rounded bg-primary-600 text-white text-sm font-medium disabled:opacity-50";

/// Email + password sign-in.
#[component]
pub fn LoginForm(on_success: EventHandler<()>) -> Element {
    let mut auth_state = use_auth();
    let session = use_auth_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        async move {
            if !email().contains('@') {
                error.set(Some("Email cannot be empty".to_string()));
                return;
            }
            if password().is_empty() {
                error.set(Some("Password cannot be empty".to_string()));
                return;
            }
            loading.set(true);
            match api::login_password(email(), password()).await {
                Ok(user) => {
                    set_signed_in(&mut auth_state, &session, Some(user));
                    error.set(None);
                    on_success.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        }
    };

    rsx! {
        form {
            class: "flex flex-col gap-4",
            onsubmit,
            label {
                "Email"
                input {
                    class: INPUT_CLASS,
                    r#type: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            label {
                "Password"
                input {
                    class: INPUT_CLASS,
                    r#type: "password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "text-sm text-red-700 m-0", "{message}" }
            }
            button {
                class: BUTTON_CLASS,
                r#type: "submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

/// Account creation. Signs the new account in on success.
#[component]
pub fn RegisterForm(on_success: EventHandler<()>) -> Element {
    let mut auth_state = use_auth();
    let session = use_auth_session();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        async move {
            if password() != confirm() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }
            loading.set(true);
            match api::register(email(), password(), name()).await {
                Ok(user) => {
                    set_signed_in(&mut auth_state, &session, Some(user));
                    error.set(None);
                    on_success.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        }
    };

    rsx! {
        form {
            class: "flex flex-col gap-4",
            onsubmit,
            label {
                "Name"
                input {
                    class: INPUT_CLASS,
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
            }
            label {
                "Email"
                input {
                    class: INPUT_CLASS,
                    r#type: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            label {
                "Password"
                input {
                    class: INPUT_CLASS,
                    r#type: "password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
            }
            label {
                "Confirm password"
                input {
                    class: INPUT_CLASS,
                    r#type: "password",
                    value: confirm(),
                    oninput: move |evt: FormEvent| confirm.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "text-sm text-red-700 m-0", "{message}" }
            }
            button {
                class: BUTTON_CLASS,
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Create account" }
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let session = use_auth_session();

    let onclick = move |_| {
        let session = session.clone();
        async move {
            match api::logout().await {
                Ok(()) => {
                    // AuthProvider picks the transition up from the session.
                    session.sign_out();
                    on_logout.call(());
                }
                Err(e) => tracing::error!("Failed to log out: {}", e),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
