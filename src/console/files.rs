use super::error::{ConsoleError, ConsoleResult};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const CREATOR: &str = "Quick Console";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of a creation action.
#[derive(Clone, Debug)]
pub struct Created {
    pub path: PathBuf,
    /// The name that was asked for, when it was taken and a suffix was added.
    pub requested: Option<String>,
}

impl Created {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Creates a folder in `dir` with an `info.txt` marker inside. Anything
/// after the first `.` in `name` is dropped.
pub fn create_folder(dir: &Path, name: &str) -> ConsoleResult<Created> {
    let stem = name.split('.').next().unwrap_or("").trim();
    let stem = validate(stem, "folder")?;
    fs::create_dir_all(dir)?;

    let (path, requested) = unique_path(dir, stem, "");
    fs::create_dir_all(&path)?;

    let folder_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let info = format!(
        "FOLDER: {folder_name}\nCreated: {}\nLocation: {}\nCreated by: {CREATOR}\n\n",
        Local::now().format(TIMESTAMP_FORMAT),
        path.display(),
    );
    fs::write(path.join("info.txt"), info)?;
    tracing::info!(path = %path.display(), "folder created");
    Ok(Created { path, requested })
}

/// Creates `<name>.txt` in `dir` with a notebook header. A trailing `.txt`
/// on `name` is ignored.
pub fn create_notebook(dir: &Path, name: &str) -> ConsoleResult<Created> {
    let trimmed = name.trim();
    let split = trimmed.len().saturating_sub(4);
    let stem = match (trimmed.get(..split), trimmed.get(split..)) {
        (Some(head), Some(ext)) if ext.eq_ignore_ascii_case(".txt") => head,
        _ => trimmed,
    };
    let stem = validate(stem.trim(), "notebook")?;
    fs::create_dir_all(dir)?;

    let (path, requested) = unique_path(dir, stem, ".txt");
    let header = format!(
        "NOTEBOOK: {stem}\nCreated: {}\nFolder: {}\n\n{}\nWRITE YOUR NOTES BELOW:\n\n",
        Local::now().format(TIMESTAMP_FORMAT),
        dir.display(),
        "=".repeat(50),
    );
    fs::write(&path, header)?;
    tracing::info!(path = %path.display(), "notebook created");
    Ok(Created { path, requested })
}

fn validate<'a>(stem: &'a str, kind: &'static str) -> ConsoleResult<&'a str> {
    if stem.is_empty() {
        return Err(ConsoleError::EmptyName(kind));
    }
    if stem.contains(['/', '\\']) || stem == ".." {
        return Err(ConsoleError::InvalidName {
            kind,
            name: stem.to_string(),
        });
    }
    Ok(stem)
}

/// First free `stem{ext}`, `stem_1{ext}`, `stem_2{ext}`, ... in `dir`.
fn unique_path(dir: &Path, stem: &str, ext: &str) -> (PathBuf, Option<String>) {
    let first = format!("{stem}{ext}");
    let mut path = dir.join(&first);
    if !path.exists() {
        return (path, None);
    }
    let mut counter = 1usize;
    loop {
        path = dir.join(format!("{stem}_{counter}{ext}"));
        if !path.exists() {
            return (path, Some(first));
        }
        counter += 1;
    }
}

/// Opens `path` in the platform file manager without waiting for it.
pub fn open_in_file_manager(path: &Path) -> ConsoleResult<()> {
    let program = if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    Command::new(program)
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|err| ConsoleError::Launch {
            program: program.to_string(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_collisions_get_numeric_suffixes() {
        let tmp = tempfile::tempdir().unwrap();
        let first = create_folder(tmp.path(), "X").unwrap();
        let second = create_folder(tmp.path(), "X").unwrap();
        let third = create_folder(tmp.path(), "X").unwrap();

        assert_eq!(first.path, tmp.path().join("X"));
        assert!(first.requested.is_none());
        assert_eq!(second.path, tmp.path().join("X_1"));
        assert_eq!(second.requested.as_deref(), Some("X"));
        assert_eq!(third.file_name(), "X_2");
    }

    #[test]
    fn folder_gets_an_info_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let created = create_folder(tmp.path(), "reports.2024").unwrap();
        assert_eq!(created.file_name(), "reports");

        let info = fs::read_to_string(created.path.join("info.txt")).unwrap();
        assert!(info.starts_with("FOLDER: reports\n"));
        assert!(info.contains("Created by: Quick Console"));
    }

    #[test]
    fn collision_keeps_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let first = create_folder(tmp.path(), "keep").unwrap();
        fs::write(first.path.join("data.bin"), b"payload").unwrap();
        create_folder(tmp.path(), "keep").unwrap();
        assert_eq!(fs::read(first.path.join("data.bin")).unwrap(), b"payload");
    }

    #[test]
    fn notebook_strips_extension_and_writes_header() {
        let tmp = tempfile::tempdir().unwrap();
        let created = create_notebook(tmp.path(), "Todo.TXT").unwrap();
        assert_eq!(created.file_name(), "Todo.txt");

        let text = fs::read_to_string(&created.path).unwrap();
        assert!(text.starts_with("NOTEBOOK: Todo\n"));
        assert!(text.contains("WRITE YOUR NOTES BELOW:"));
    }

    #[test]
    fn notebook_collisions_do_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("notes.txt"), "mine").unwrap();
        let created = create_notebook(tmp.path(), "notes").unwrap();

        assert_eq!(created.file_name(), "notes_1.txt");
        assert_eq!(created.requested.as_deref(), Some("notes.txt"));
        assert_eq!(fs::read_to_string(tmp.path().join("notes.txt")).unwrap(), "mine");
    }

    #[test]
    fn empty_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            create_folder(tmp.path(), "  "),
            Err(ConsoleError::EmptyName("folder"))
        ));
        assert!(matches!(
            create_folder(tmp.path(), ".hidden"),
            Err(ConsoleError::EmptyName("folder"))
        ));
        assert!(matches!(
            create_notebook(tmp.path(), ".txt"),
            Err(ConsoleError::EmptyName("notebook"))
        ));
    }

    #[test]
    fn path_separators_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            create_notebook(tmp.path(), "a/b"),
            Err(ConsoleError::InvalidName { .. })
        ));
    }

    #[test]
    fn missing_target_directory_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("fresh");
        create_notebook(&dir, "first").unwrap();
        assert!(dir.join("first.txt").is_file());
    }
}
