use crate::error::{NotesError, Result};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use uuid::Uuid;

const FALLBACK_EDITORS: &[&str] = &["nano", "vim", "vi"];

/// An editor invocation: the program plus any arguments that came with it
/// (`EDITOR="code --wait"`). The file to edit is appended last.
///
/// The command is split on whitespace with no quoting, so a program path that
/// contains spaces is not supported. Put such an editor on the PATH or behind a
/// wrapper script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EditorCommand {
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Picks the editor: the configured one, then $EDITOR, then $VISUAL, then
/// the first of nano, vim or vi found on the PATH.
pub fn get_editor(configured: Option<&str>) -> Result<EditorCommand> {
    let from_env = |name: &str| env::var(name).ok();
    let candidates = [
        configured.map(str::to_string),
        from_env("EDITOR"),
        from_env("VISUAL"),
    ];
    if let Some(command) = candidates.iter().flatten().find_map(|c| EditorCommand::parse(c)) {
        return Ok(command);
    }

    for fallback in FALLBACK_EDITORS {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(EditorCommand {
                program: (*fallback).to_string(),
                args: Vec::new(),
            });
        }
    }

    Err(NotesError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(editor: &EditorCommand, file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    debug!(editor = %editor.program, file = %path.display(), "launching editor");

    let status = Command::new(&editor.program)
        .args(&editor.args)
        .arg(path)
        .status()
        .map_err(|e| {
            NotesError::Editor(format!("Failed to launch editor '{}': {}", editor.program, e))
        })?;

    if !status.success() {
        return Err(NotesError::Editor(format!(
            "Editor '{}' exited with {}",
            editor.program, status
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Hands `initial` to the editor through a scratch file and returns what the
/// user saved. The scratch file is removed whether or not editing succeeds.
pub fn edit_text(initial: &str, configured: Option<&str>) -> Result<String> {
    let editor = get_editor(configured)?;
    let scratch = ScratchFile::create(initial)?;
    open_in_editor(&editor, &scratch.path)
}

struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// A fresh file in the temp dir, readable by the owner only, holding `content`.
    fn create(content: &str) -> Result<Self> {
        let path = env::temp_dir().join(format!("notes-edit-{}.txt", Uuid::new_v4()));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&path)?;
        let scratch = Self { path };
        file.write_all(content.as_bytes())?;
        Ok(scratch)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let cmd = EditorCommand::parse("code --wait  -n").unwrap();
        assert_eq!(cmd.program, "code");
        assert_eq!(cmd.args, vec!["--wait", "-n"]);
    }

    #[test]
    fn parse_splits_paths_containing_spaces() {
        let cmd = EditorCommand::parse("/opt/My Editor/edit").unwrap();
        assert_eq!(cmd.program, "/opt/My");
        assert_eq!(cmd.args, vec!["Editor/edit"]);
    }

    #[test]
    fn parse_rejects_blank_command() {
        assert_eq!(EditorCommand::parse("   "), None);
    }

    #[test]
    fn configured_editor_takes_precedence() {
        let cmd = get_editor(Some("my-editor -x")).unwrap();
        assert_eq!(cmd.program, "my-editor");
        assert_eq!(cmd.args, vec!["-x"]);
    }

    #[test]
    fn scratch_file_is_removed_on_drop() {
        let scratch = ScratchFile::create("hello").unwrap();
        let path = scratch.path.clone();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        drop(scratch);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn scratch_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let scratch = ScratchFile::create("secret").unwrap();
        let mode = fs::metadata(&scratch.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn successful_editor_returns_file_contents() {
        let edited = edit_text("unchanged", Some("true")).unwrap();
        assert_eq!(edited, "unchanged");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_is_an_error() {
        let err = edit_text("text", Some("false")).unwrap_err();
        assert!(matches!(err, NotesError::Editor(_)));
    }

    #[test]
    fn missing_editor_program_is_an_error() {
        let err = edit_text("text", Some("definitely-not-an-editor-4f1c")).unwrap_err();
        assert!(matches!(err, NotesError::Editor(_)));
    }
}
