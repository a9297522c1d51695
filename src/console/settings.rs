use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_VERSION: &str = "1.0";
const SETTINGS_FILE: &str = ".quick_console_settings.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub target_dir: PathBuf,
    pub last_used: DateTime<Utc>,
    pub version: String,
}

impl Settings {
    pub fn for_target(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            last_used: Utc::now(),
            version: SETTINGS_VERSION.to_string(),
        }
    }
}

pub fn settings_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SETTINGS_FILE))
}

/// Reads settings from `path`. Missing, unreadable or partially written
/// files all yield `None`.
pub fn load_from(path: &Path) -> Option<Settings> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring corrupt settings: {err}");
            None
        }
    }
}

/// Writes settings through a sibling temp file so a crash never leaves a
/// truncated record behind.
pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

/// Picks the startup target directory: the saved one if it still exists,
/// otherwise the platform default.
pub fn resolve_target_dir(saved: Option<&Settings>) -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    resolve_target_dir_in(saved, &home)
}

fn resolve_target_dir_in(saved: Option<&Settings>, home: &Path) -> PathBuf {
    saved
        .map(|settings| settings.target_dir.clone())
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| default_target_dir_in(home))
}

/// The user's Desktop folder, created if absent.
fn default_target_dir_in(home: &Path) -> PathBuf {
    let mut candidates = vec![home.join("Desktop")];
    if cfg!(windows) {
        candidates.push(home.join("Рабочий стол"));
        if let Ok(profile) = std::env::var("USERPROFILE") {
            candidates.push(PathBuf::from(profile).join("Desktop"));
        }
    }
    if let Some(existing) = candidates.iter().find(|dir| dir.is_dir()) {
        return existing.clone();
    }

    let desktop = home.join("Desktop");
    if let Err(err) = std::fs::create_dir_all(&desktop) {
        tracing::warn!(dir = %desktop.display(), "cannot create default directory: {err}");
        return home.to_path_buf();
    }
    desktop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_and_loads_the_target_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("settings.json");
        let settings = Settings::for_target(tmp.path().to_path_buf());

        save_to(&path, &settings).unwrap();
        let loaded = load_from(&path).unwrap();

        assert_eq!(loaded.target_dir, tmp.path());
        assert_eq!(loaded.version, SETTINGS_VERSION);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "{\"target_dir\": \"/tm").unwrap();
        assert!(load_from(&path).is_none());
    }

    #[test]
    fn missing_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_from(&tmp.path().join("absent.json")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn vanished_saved_directory_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let saved = Settings::for_target(tmp.path().join("gone"));
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).unwrap();

        let resolved = resolve_target_dir_in(Some(&saved), &home);
        assert_eq!(resolved, home.join("Desktop"));
        assert!(resolved.is_dir());
    }

    #[test]
    fn existing_saved_directory_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let saved = Settings::for_target(tmp.path().to_path_buf());
        let home = tmp.path().join("home");
        assert_eq!(resolve_target_dir_in(Some(&saved), &home), tmp.path());
        assert!(!home.exists());
    }
}
