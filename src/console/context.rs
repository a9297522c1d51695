use std::path::{Path, PathBuf};

/// State shared by every console action: the directory shell commands run
/// in and new folders/notebooks are created in.
#[derive(Clone, Debug)]
pub struct ConsoleContext {
    target_dir: PathBuf,
    settings_path: Option<PathBuf>,
}

impl ConsoleContext {
    pub fn new(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            settings_path: None,
        }
    }

    /// Persist the target directory to `path` whenever it is saved.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn set_target_dir(&mut self, dir: PathBuf) {
        tracing::info!(dir = %dir.display(), "target directory changed");
        self.target_dir = dir;
    }

    /// Creates the target directory if it went missing since startup.
    pub fn ensure_target_dir(&self) -> std::io::Result<&Path> {
        if !self.target_dir.exists() {
            std::fs::create_dir_all(&self.target_dir)?;
        }
        Ok(&self.target_dir)
    }

    /// Best-effort save of the current target directory.
    pub fn persist(&self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        let settings = super::settings::Settings::for_target(self.target_dir.clone());
        if let Err(err) = super::settings::save_to(path, &settings) {
            tracing::warn!(path = %path.display(), "failed to save settings: {err:#}");
        }
    }
}
