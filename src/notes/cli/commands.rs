use super::print::{
    print_config, print_doctor_report, print_info, print_note, print_notes, print_success,
};
use super::setup::SortArg;
use notes::api::NotesApi;
use notes::commands::config::{self, ConfigAction, ConfigOutcome};
use notes::config::NotesConfig;
use notes::editor::edit_text;
use notes::error::{CorruptionError, Result};
use notes::paths::NotesPaths;
use notes::sort::{SortField, SortOrder};

/// What the note commands need besides their arguments.
pub(super) struct AppContext {
    pub api: NotesApi,
    pub config: NotesConfig,
}

pub(super) fn handle_create(ctx: &AppContext, title: String, content: String) -> Result<()> {
    let note = ctx.api.create_note(title, content)?;
    print_success(&format!("Added note {:?}", note.title));
    Ok(())
}

pub(super) fn handle_list(ctx: &AppContext, sort_by: Option<SortArg>, reverse: bool) -> Result<()> {
    let field = sort_by.map(SortField::from).unwrap_or(ctx.config.default_sort);
    let order = SortOrder::from_reverse(reverse);
    let notes = ctx.api.list_sorted(field, order)?;
    print_notes(&notes, field, order);
    Ok(())
}

pub(super) fn handle_view(ctx: &AppContext, title: &str) -> Result<()> {
    let note = ctx.api.get_note(title)?;
    print_note(&note);
    Ok(())
}

pub(super) fn handle_edit(ctx: &AppContext, title: &str) -> Result<()> {
    let mut note = ctx.api.get_note(title)?;
    let edited = edit_text(&note.content, ctx.config.editor.as_deref())?;

    if edited == note.content {
        print_info("No changes made to note.");
        return Ok(());
    }

    note.content = edited;
    ctx.api.update_note(&note)?;
    print_success("Note updated successfully.");
    Ok(())
}

pub(super) fn handle_delete(ctx: &AppContext, title: &str) -> Result<()> {
    ctx.api.delete_note(title)?;
    print_success(&format!("Deleted note {:?}", title));
    Ok(())
}

pub(super) fn handle_doctor(ctx: &AppContext, repair: bool) -> Result<()> {
    let report = ctx.api.doctor(repair)?;
    print_doctor_report(&report);
    if report.is_healthy() || repair {
        Ok(())
    } else {
        Err(CorruptionError::Inconsistent {
            problems: report.problem_count(),
        }
        .into())
    }
}

pub(super) fn handle_config(
    paths: &NotesPaths,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    match config::run(paths, action)? {
        ConfigOutcome::All(config) => print_config(&config),
        ConfigOutcome::Value { value, .. } => println!("{}", value),
        ConfigOutcome::Updated { key, value } => {
            print_success(&format!("{} set to {}", key, value))
        }
    }
    Ok(())
}

pub(super) fn handle_version() {
    println!("notes  |  {}", super::setup::get_version());
}
