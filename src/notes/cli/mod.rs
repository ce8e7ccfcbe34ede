//! # CLI Layer
//!
//! One client of the notes library, and the only code that touches the
//! terminal: it parses arguments, installs logging, opens the store, calls
//! [`NotesApi`] and prints the results. Diagnostics go to stderr through
//! `tracing`; stdout carries command output only.
//!
//! `version` and `config` never open the database, so they work while another
//! process holds it.

mod commands;
mod print;
mod setup;

use clap::Parser;
use commands::AppContext;
use notes::api::NotesApi;
use notes::config::NotesConfig;
use notes::error::Result;
use notes::paths::NotesPaths;
use notes::store::Store;
use setup::{Cli, Commands};
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let paths = NotesPaths::resolve(cli.home.clone())?;

    match cli.command {
        Some(Commands::Version) => {
            commands::handle_version();
            return Ok(());
        }
        Some(Commands::Config { key, value }) => {
            return commands::handle_config(&paths, key, value);
        }
        _ => {}
    }

    let ctx = init_context(&paths)?;
    let result = dispatch(&ctx, cli.command);
    ctx.api.close();
    result
}

fn dispatch(ctx: &AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Create { title, content }) => commands::handle_create(ctx, title, content),
        Some(Commands::List { sort_by, reverse }) => commands::handle_list(ctx, sort_by, reverse),
        Some(Commands::View { title }) => commands::handle_view(ctx, &title),
        Some(Commands::Edit { title }) => commands::handle_edit(ctx, &title),
        Some(Commands::Delete { title }) => commands::handle_delete(ctx, &title),
        Some(Commands::Doctor { repair }) => commands::handle_doctor(ctx, repair),
        Some(Commands::Config { .. }) | Some(Commands::Version) => Ok(()),
        None => commands::handle_list(ctx, None, false),
    }
}

fn init_context(paths: &NotesPaths) -> Result<AppContext> {
    let dir = paths.ensure_notes_dir()?;
    let config = NotesConfig::load(&dir)?;
    let store = Store::open(paths.db_file(), config.open_timeout())?;
    let api = NotesApi::new(store, config.validator());
    Ok(AppContext { api, config })
}

/// `RUST_LOG` wins when set; otherwise the level from the flags applies to
/// this crate only.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("notes={}", cli.level_filter())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
