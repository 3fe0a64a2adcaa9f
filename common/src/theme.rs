//! # Theme Preference
//!
//! The only state that outlives a run: a single `theme` key holding `"dark"`
//! or `"light"`. Storage sits behind [`PreferenceStore`] so the dashboard never
//! touches the filesystem directly.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unrecognised theme value `{0}`")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn flipped(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemePreference::Dark => "🌙",
            ThemePreference::Light => "☀️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Dark => "Dark",
            ThemePreference::Light => "Light",
        }
    }
}

impl FromStr for ThemePreference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            other => Err(PreferenceError::UnknownTheme(other.to_string())),
        }
    }
}

/// Durable key/value storage for user preferences.
pub trait PreferenceStore: Send {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Plain `key=value` file, one entry per line. Lines starting with `#` are ignored.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/ipscope/preferences`, falling back to `%APPDATA%` and
    /// then `$HOME/.config`.
    pub fn default_location() -> Option<PathBuf> {
        let base: PathBuf = env::var_os("XDG_CONFIG_HOME")
            .or_else(|| env::var_os("APPDATA"))
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;
        Some(base.join("ipscope").join("preferences"))
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let content: String = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect())
    }
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load_entries()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut entries = self.load_entries()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body: String = entries
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect();
        fs::write(&self.path, body)?;
        debug!("Stored {key}={value} in {}", self.path.display());
        Ok(())
    }
}

/// The active theme together with the store it is persisted in.
pub struct ThemeState {
    preference: ThemePreference,
    store: Box<dyn PreferenceStore>,
}

impl ThemeState {
    /// Reads the stored theme, defaulting to dark when absent or unreadable.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let preference: ThemePreference = match store.read(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {e}");
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                warn!("Could not read theme preference: {e}");
                ThemePreference::default()
            }
        };
        Self { preference, store }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Flips the theme and persists it. A failed write keeps the new theme for
    /// this run only.
    pub fn toggle(&mut self) -> ThemePreference {
        self.preference = self.preference.flipped();
        if let Err(e) = self.store.write(THEME_KEY, self.preference.as_str()) {
            warn!("Could not persist theme preference: {e}");
        }
        self.preference
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }
}
