use clap::{Parser, Subcommand, ValueEnum};
use notes::sort::SortField;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.1.1" for releases, "0.1.1@abc1234" otherwise
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notes", bin_name = "notes", version = get_version())]
#[command(about = "Take notes from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory that holds .notes/ (defaults to $NOTES_HOME, then your home directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level for diagnostics on stderr
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new", alias = "n")]
    Create {
        /// Title of the note
        title: String,

        /// Initial content
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// List all notes
    #[command(alias = "ls")]
    List {
        /// Field to sort by (defaults to the configured default-sort)
        #[arg(short = 's', long, value_enum)]
        sort_by: Option<SortArg>,

        /// Reverse the sort order
        #[arg(short, long)]
        reverse: bool,
    },

    /// Print a note
    View {
        title: String,
    },

    /// Edit a note's content in your editor
    Edit {
        title: String,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        title: String,
    },

    /// Check the notes database for inconsistencies
    Doctor {
        /// Fix what can be fixed
        #[arg(long)]
        repair: bool,
    },

    /// Show or change configuration
    Config {
        key: Option<String>,
        value: Option<String>,
    },

    /// Print the version
    Version,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Title,
    Created,
    Modified,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SortField::Title,
            SortArg::Created => SortField::Created,
            SortArg::Modified => SortField::Modified,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl Cli {
    /// `--log-level` wins over `-v`; without either only warnings are shown.
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}
