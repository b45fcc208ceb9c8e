//! Settings the parent chooses inside the app, kept across restarts.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::i18n::Language;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub language: Language,
}

pub struct PreferenceStore {
    path: PathBuf,
    /// Last revision handed out by [`PreferenceStore::next_revision`]
    issued: AtomicU64,
    /// Revision currently on disk; the lock also serializes writers
    written: Mutex<u64>,
}

impl PreferenceStore {
    /// Store at `~/.config/haraka/preferences.json`.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or(anyhow::anyhow!("Could not find config directory"))?
            .join("haraka");

        Ok(Self::in_dir(config_dir))
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            path: dir.join("preferences.json"),
            issued: AtomicU64::new(0),
            written: Mutex::new(0),
        }
    }

    /// Saved preferences, or the defaults when the file is missing or unreadable.
    pub fn load(&self) -> Preferences {
        if !self.path.exists() {
            return Preferences::default();
        }

        match fs::read_to_string(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|json| serde_json::from_str(&json).map_err(anyhow::Error::from))
        {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences {:?}: {}", self.path, e);
                Preferences::default()
            }
        }
    }

    /// Number a change in the order the user made it.
    pub fn next_revision(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Write `preferences` unless a later revision is already on disk.
    ///
    /// Returns whether the file was written.
    pub fn save_revision(&self, preferences: &Preferences, revision: u64) -> Result<bool> {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        if revision <= *written {
            tracing::debug!(
                "Skipping preferences revision {}, {} already saved",
                revision,
                *written
            );
            return Ok(false);
        }
        self.save(preferences)?;
        *written = revision;
        Ok(true)
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(preferences)?)?;
        tracing::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(dir.path().join("haraka"));
        assert_eq!(store.load(), Preferences::default());
        assert_eq!(store.load().language, Language::English);
    }

    #[test]
    fn language_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(dir.path().join("haraka"));
        store
            .save(&Preferences {
                language: Language::French,
            })
            .unwrap();

        let reopened = PreferenceStore::in_dir(dir.path().join("haraka"));
        assert_eq!(reopened.load().language, Language::French);
    }

    #[test]
    fn stale_revision_does_not_overwrite_newer_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(dir.path().to_path_buf());
        let to_french = store.next_revision();
        let back_to_english = store.next_revision();
        assert!(back_to_english > to_french);

        // The later toggle lands first
        let english = Preferences {
            language: Language::English,
        };
        let french = Preferences {
            language: Language::French,
        };
        assert!(store.save_revision(&english, back_to_english).unwrap());
        assert!(!store.save_revision(&french, to_french).unwrap());

        assert_eq!(store.load().language, Language::English);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("preferences.json"), "{not json").unwrap();
        let store = PreferenceStore::in_dir(dir.path().to_path_buf());
        assert_eq!(store.load(), Preferences::default());
    }
}
