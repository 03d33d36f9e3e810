//! Server settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` in the working directory, then environment variables with `_`
//! as the section separator (`DATABASE_HOST`, `BLOBS_DIR`, `SESSION_SECURE`, ...).
//! `DATABASE_URL`, when set, overrides the assembled connection string.

use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub name: String,
    pub connections: u32,
}

impl Database {
    pub fn url(&self) -> String {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return url;
        }
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            user: "notesapp".into(),
            password: "password".into(),
            host: "localhost".into(),
            port: "5432".into(),
            name: "notesapp".into(),
            connections: 5,
        }
    }
}

/// Where uploads are written and the URL prefix they are served under.
#[derive(Debug, Clone, Deserialize)]
pub struct Blobs {
    pub dir: String,
    pub url: String,
}

impl Default for Blobs {
    fn default() -> Self {
        Self {
            dir: "blobs".into(),
            url: "/blobs".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Send the cookie over HTTPS only.
    pub secure: bool,
    /// Inactivity expiry.
    pub days: i64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            secure: false,
            days: 7,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub database: Database,
    pub blobs: Blobs,
    pub session: Session,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("database.user", "notesapp")?
            .set_default("database.password", "password")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", "5432")?
            .set_default("database.name", "notesapp")?
            .set_default("database.connections", 5)?
            .set_default("blobs.dir", "blobs")?
            .set_default("blobs.url", "/blobs")?
            .set_default("session.secure", false)?
            .set_default("session.days", 7)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().separator("_"))
            .build()?;

        config.try_deserialize()
    }

    /// Process-wide settings, loaded on first use.
    ///
    /// Falls back to the defaults if the sources cannot be read.
    pub fn current() -> &'static Settings {
        static SETTINGS: OnceLock<Settings> = OnceLock::new();
        SETTINGS.get_or_init(|| {
            dotenvy::dotenv().ok();
            Settings::new().unwrap_or_else(|e| {
                tracing::warn!("Invalid settings, using defaults: {}", e);
                Settings::default()
            })
        })
    }
}
