use crate::error::{NotesError, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const NOTES_DIR: &str = ".notes";
pub const DB_FILENAME: &str = "notes.db";
pub const HOME_ENV: &str = "NOTES_HOME";

/// Where the notes directory lives. `root` is the directory that contains
/// `.notes/`, normally the user's home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPaths {
    pub root: PathBuf,
}

impl NotesPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `explicit` (the `--home` flag) wins, then `$NOTES_HOME`, then the home directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let env = std::env::var_os(HOME_ENV).map(PathBuf::from);
        Self::resolve_from(explicit, env)
    }

    fn resolve_from(explicit: Option<PathBuf>, env: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit.or(env).filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::new(root));
        }
        BaseDirs::new()
            .map(|dirs| Self::new(dirs.home_dir()))
            .ok_or_else(|| {
                NotesError::Config(format!(
                    "could not determine home directory; pass --home or set ${}",
                    HOME_ENV
                ))
            })
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR)
    }

    pub fn db_file(&self) -> PathBuf {
        self.notes_dir().join(DB_FILENAME)
    }

    /// Creates `.notes/` (owner-only on unix) if it is missing.
    pub fn ensure_notes_dir(&self) -> Result<PathBuf> {
        let dir = self.notes_dir();
        if !dir.is_dir() {
            create_private_dir(&dir)?;
        }
        Ok(dir)
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}
