use crate::config::NotesConfig;
use crate::error::Result;
use crate::paths::NotesPaths;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOutcome {
    All(NotesConfig),
    Value { key: String, value: String },
    Updated { key: String, value: String },
}

/// Reads or changes `.notes/config.json`. Unknown keys and unparseable values
/// are errors; nothing is written unless the new value is valid.
pub fn run(paths: &NotesPaths, action: ConfigAction) -> Result<ConfigOutcome> {
    let dir = paths.notes_dir();
    match action {
        ConfigAction::ShowAll => Ok(ConfigOutcome::All(NotesConfig::load(&dir)?)),
        ConfigAction::ShowKey(key) => {
            let value = NotesConfig::load(&dir)?.get(&key)?;
            Ok(ConfigOutcome::Value { key, value })
        }
        ConfigAction::Set(key, value) => {
            let mut config = NotesConfig::load(&dir)?;
            config.set(&key, &value)?;
            paths.ensure_notes_dir()?;
            config.save(&dir)?;
            let value = config.get(&key)?;
            Ok(ConfigOutcome::Updated { key, value })
        }
    }
}
