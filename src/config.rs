use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::dates::Locale;
use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "sitecards.toml";

/// Runtime settings. Loaded from TOML, then overridden by `SITECARDS_*` env vars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint the panel is seeded with.
    pub endpoint: String,
    /// Panel heading.
    pub title: String,
    pub locale: Locale,
    /// Fetch the seeded endpoint as soon as the panel mounts.
    pub fetch_on_mount: bool,
    pub user_agent: String,
    /// Overrides for user-visible strings, keyed like the built-in catalog.
    pub strings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "https://haxtheweb.org/".to_string(),
            title: "HAX site search".to_string(),
            locale: Locale::EnUs,
            fetch_on_mount: false,
            user_agent: concat!("sitecards/", env!("CARGO_PKG_VERSION")).to_string(),
            strings: HashMap::new(),
        }
    }
}

impl Config {
    /// `<config dir>/sitecards.toml` for the current user, when one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "sitecards", "sitecards").map(|p| p.config_dir().join(CONFIG_FILE))
    }

    pub fn from_toml_str(s: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|source| ConfigError::Parse { path: origin.to_string(), source })
    }

    /// An explicit `path` must exist. Without one, the default location is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let shown = path.display().to_string();
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: shown.clone(), source })?;
        Self::from_toml_str(&raw, &shown)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|k| std::env::var(k).ok())
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = lookup("SITECARDS_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            self.endpoint = v.trim().to_string();
        }
        if let Some(v) = lookup("SITECARDS_LOCALE") {
            self.locale = v.parse()?;
        }
        if let Some(v) = lookup("SITECARDS_FETCH_ON_MOUNT") {
            self.fetch_on_mount = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(v) = lookup("SITECARDS_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            self.user_agent = v;
        }
        Ok(())
    }
}
