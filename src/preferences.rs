//! User preference storage.
//!
//! Preferences are persisted as pretty JSON at a configurable path
//! (`user_memory.json` by default). A missing or unreadable file falls back
//! to defaults so the agent can always start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::poly::Notation;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preferences JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationStyle {
    #[default]
    Stepwise,
    Concise,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Power rule tools, term by term.
    Manual,
    /// Defer to a computer-algebra collaborator when one is available.
    Symbolic,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Preferences that shape the agent's prompts and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub name: String,
    pub preferred_explanation_style: ExplanationStyle,
    pub preferred_method: Method,
    pub notation_preference: Notation,
    pub show_reasoning: bool,
    pub verification_required: bool,
    pub math_level: MathLevel,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            preferred_explanation_style: ExplanationStyle::default(),
            preferred_method: Method::default(),
            notation_preference: Notation::default(),
            show_reasoning: true,
            verification_required: true,
            math_level: MathLevel::default(),
        }
    }
}

/// Preferences plus the file they live in.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    preferences: UserPreferences,
    storage_path: PathBuf,
}

impl PreferencesStore {
    /// Load from `path`, falling back to defaults if the file is missing or
    /// unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();

        let preferences = if storage_path.exists() {
            match Self::load_from_path(&storage_path) {
                Ok(p) => {
                    tracing::info!("Loaded preferences from {}", storage_path.display());
                    p
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load preferences from {}: {}, using defaults",
                        storage_path.display(),
                        e
                    );
                    UserPreferences::default()
                }
            }
        } else {
            tracing::info!(
                "No preferences file found at {}, using defaults",
                storage_path.display()
            );
            UserPreferences::default()
        };

        Self {
            preferences,
            storage_path,
        }
    }

    fn load_from_path(path: &Path) -> Result<UserPreferences, PreferencesError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the current preferences to disk.
    pub fn save(&self) -> Result<(), PreferencesError> {
        let io_err = |source| PreferencesError::Io {
            path: self.storage_path.clone(),
            source,
        };

        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.preferences)?;
        std::fs::write(&self.storage_path, contents).map_err(io_err)?;
        tracing::debug!("Saved preferences to {}", self.storage_path.display());
        Ok(())
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut UserPreferences {
        &mut self.preferences
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::load(dir.path().join("absent.json"));
        assert_eq!(store.preferences(), &UserPreferences::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/prefs.json");

        let mut store = PreferencesStore::load(&path);
        store.preferences_mut().name = "Ada".to_string();
        store.preferences_mut().notation_preference = Notation::Plain;
        store.preferences_mut().math_level = MathLevel::Advanced;
        store.save().unwrap();

        let reloaded = PreferencesStore::load(&path);
        assert_eq!(reloaded.preferences().name, "Ada");
        assert_eq!(reloaded.preferences().notation_preference, Notation::Plain);
        assert_eq!(reloaded.preferences().math_level, MathLevel::Advanced);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"name": "Sam", "preferred_method": "manual"}"#).unwrap();

        let store = PreferencesStore::load(&path);
        assert_eq!(store.preferences().name, "Sam");
        assert_eq!(store.preferences().preferred_method, Method::Manual);
        assert!(store.preferences().verification_required);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = PreferencesStore::load(&path);
        assert_eq!(store.preferences(), &UserPreferences::default());
    }
}
