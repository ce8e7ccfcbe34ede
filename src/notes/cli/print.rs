use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use notes::commands::doctor::DoctorReport;
use notes::config::NotesConfig;
use notes::model::Note;
use notes::sort::{SortField, SortOrder};
use unicode_width::UnicodeWidthStr;

const DATE_FORMAT: &str = "%b %-d, %Y %H:%M";
const DATE_WIDTH: usize = 18;
const SEPARATOR: &str = "  |  ";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

pub(super) fn print_notes(notes: &[Note], field: SortField, order: SortOrder) {
    if notes.is_empty() {
        println!("You have no notes");
        return;
    }

    let direction = match order {
        SortOrder::Ascending => "ascending",
        SortOrder::Descending => "descending",
    };
    println!("{}", format!("Notes sorted by {} ({})", field, direction).bold());
    println!();

    for line in render_table(notes) {
        println!("{}", line);
    }
}

/// Plain table lines, header first. Kept separate from printing so the
/// layout can be tested without a terminal.
fn render_table(notes: &[Note]) -> Vec<String> {
    let title_width = notes
        .iter()
        .map(|n| n.title.width())
        .max()
        .unwrap_or(0)
        .max("Title".len());

    let mut lines = Vec::with_capacity(notes.len() + 2);
    lines.push(row("Title", "Created", "Modified", title_width));
    lines.push(
        [
            "-".repeat(title_width),
            "-".repeat(DATE_WIDTH),
            "-".repeat(DATE_WIDTH),
        ]
        .join(SEPARATOR),
    );
    for note in notes {
        lines.push(row(
            &note.title,
            &format_date(note.created_at),
            &format_date(note.modified_at),
            title_width,
        ));
    }
    lines
}

fn row(title: &str, created: &str, modified: &str, title_width: usize) -> String {
    format!(
        "{}{}{}{:<dw$}{}{}",
        title,
        " ".repeat(title_width.saturating_sub(title.width())),
        SEPARATOR,
        created,
        SEPARATOR,
        modified,
        dw = DATE_WIDTH
    )
    .trim_end()
    .to_string()
}

fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

pub(super) fn print_note(note: &Note) {
    println!("{}", note.title.bold());
    println!(
        "{}",
        format!(
            "Created {}  ·  Modified {}",
            format_date(note.created_at),
            format_date(note.modified_at)
        )
        .dimmed()
    );
    println!("--------------------------------");
    println!("{}", note.content);
}

pub(super) fn print_config(config: &NotesConfig) {
    println!("max-title-length = {}", config.max_title_length);
    println!("open-timeout-ms = {}", config.open_timeout_ms);
    println!("default-sort = {}", config.default_sort);
    println!(
        "editor = {}",
        config.editor.as_deref().unwrap_or("(from $EDITOR)")
    );
}

pub(super) fn print_doctor_report(report: &DoctorReport) {
    println!("Checked {} notes", report.notes_checked);

    let sections: [(&str, &[String]); 4] = [
        ("Title entries without a note", &report.dangling_titles),
        ("Notes missing from the title index", &report.orphaned_notes),
        ("Title entries pointing at the wrong note", &report.mismatched_titles),
        ("Notes that could not be decoded", &report.undecodable_notes),
    ];
    for (heading, items) in sections {
        if items.is_empty() {
            continue;
        }
        print_warning(&format!("{} ({}):", heading, items.len()));
        for item in items {
            println!("  {}", item);
        }
    }

    if report.removed_titles > 0 || report.reindexed_notes > 0 {
        print_success(&format!(
            "Repaired: removed {} title entries, reindexed {} notes",
            report.removed_titles, report.reindexed_notes
        ));
    }

    if report.is_healthy() {
        print_success("No problems found.");
    } else if report.removed_titles == 0 && report.reindexed_notes == 0 {
        print_info("Run `notes doctor --repair` to fix what can be fixed.");
    }
}
