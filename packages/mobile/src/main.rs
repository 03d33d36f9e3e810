use dioxus::prelude::*;

use ui::{ActivityBanner, ActivityLogPanel, ActivityLogToggle, AuthProvider, LogoutButton, Navbar};
use views::{Categories, EditNote, Login, NewNote, Notes, Profile, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(AppLayout)]
        #[route("/notes")]
        Notes {},
        #[route("/notes/new")]
        NewNote {},
        #[route("/notes/:note_id")]
        EditNote { note_id: String },
        #[route("/categories")]
        Categories {},
        #[route("/profile")]
        Profile {},
}

fn main() {
    #[cfg(feature = "server")]
    {
        init_tracing();
        tokio::runtime::Runtime::new()
            .expect("Failed to start runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_http::services::ServeDir;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();
    let settings = api::settings::Settings::current();

    // Initialize database pool
    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to create session table");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * settings.session.days.max(1) as u64)
                .try_into()
                .expect("Session expiry out of range"),
        ));

    let router = axum::Router::new()
        // Uploaded images
        .nest_service("/blobs", ServeDir::new(&settings.blobs.dir))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/notes`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Notes {});
    rsx! {}
}

/// Signed-in screens: navigation bar on top, activity panel at the bottom.
/// Signed-out visitors are sent to the login screen.
#[component]
fn AppLayout() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();

    let state = auth();
    if !state.loading && state.user.is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }
    let greeting = state
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "min-h-screen bg-neutral-50 pb-16",
            Navbar {
                title: "Notes",
                Link { class: "text-sm text-neutral-700", to: Route::Notes {}, "All notes" }
                Link { class: "text-sm text-neutral-700", to: Route::Categories {}, "Categories" }
                Link { class: "text-sm text-neutral-700", to: Route::Profile {}, "{greeting}" }
                ActivityLogToggle {}
                LogoutButton {
                    class: "text-sm text-neutral-700",
                    on_logout: move |_| {
                        nav.replace(Route::Login {});
                    },
                }
            }
            ActivityBanner {}
            Outlet::<Route> {}
            ActivityLogPanel {}
        }
    }
}
