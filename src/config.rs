//! Process-wide configuration and the persisted UI theme preference.
//!
//! Sources, lowest priority first: built-in defaults, `reckon.toml` in the
//! working directory, then `RECKON_`-prefixed environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::ReckonError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite URL; the database file is created when missing.
    pub database_url: String,
    /// Default tracing filter when RUST_LOG is unset.
    pub loglevel: String,
    /// Base URL the console and recorder send API requests to.
    pub api_base_url: Url,
    /// Seed the stock history entries on startup when the store is empty.
    pub seed_history: bool,
    /// Where the theme preference JSON is persisted.
    pub theme_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:reckon.sqlite".to_string(),
            loglevel: "info".to_string(),
            api_base_url: Url::parse("http://127.0.0.1:8000/").expect("default URL is valid"),
            seed_history: true,
            theme_path: PathBuf::from("reckon-theme.json"),
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file("reckon.toml"))
        .merge(Env::prefixed("RECKON_"))
        .extract()
        .expect("invalid configuration")
});

/// Display theme of the console front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Theme preference with an init-on-load, persist-on-change lifecycle.
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    current: Theme,
}

impl ThemeStore {
    /// Load the saved preference; a missing or unreadable file falls back to
    /// the default without failing startup.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let current = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt theme file; using default");
                Theme::default()
            }),
            Err(_) => Theme::default(),
        };
        Self { path, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the preference and persist it immediately.
    pub fn toggle(&mut self) -> Result<Theme, ReckonError> {
        self.current = self.current.toggled();
        fs::write(&self.path, serde_json::to_string(&self.current)?)?;
        Ok(self.current)
    }
}
