use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use daylog_core::{EntryKind, VERSION};

/// Daylog - A local, encrypted bullet journal
#[derive(Parser)]
#[command(name = "daylog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal file
    #[arg(short, long, global = true, env = "DAYLOG_PATH")]
    pub journal: Option<String>,

    /// Treat this day (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "DAYLOG_TODAY", hide = true)]
    pub today: Option<String>,

    /// Use a throwaway in-memory journal
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the journal will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// IANA timezone used to decide what "today" is (e.g. Europe/Berlin)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Day selection shared by commands that act on a day's entries
#[derive(Args, Clone, Default)]
pub struct DayArgs {
    /// Day to act on (YYYY-MM-DD, today, yesterday, tomorrow)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
}

/// Arguments for the `view` command
#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub day: DayArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Entry type (task, note, event, gratitude, goal, important, habit,
    /// morning-journal, evening-journal)
    #[arg(value_name = "TYPE")]
    pub entry_type: String,

    /// Entry content
    #[arg(value_name = "CONTENT", required = true, num_args = 1..)]
    pub content: Vec<String>,

    #[command(flatten)]
    pub day: DayArgs,
}

/// Arguments for commands that target one entry
#[derive(Args)]
pub struct TargetArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub day: DayArgs,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// New content
    #[arg(value_name = "CONTENT", required = true, num_args = 1..)]
    pub content: Vec<String>,
}

/// Arguments for the `migrate` command
#[derive(Args)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Day to move the task to
    #[arg(value_name = "TARGET_DATE")]
    pub to: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReflectionKind {
    Gratitude,
    Morning,
    Evening,
}

impl From<ReflectionKind> for EntryKind {
    fn from(kind: ReflectionKind) -> Self {
        match kind {
            ReflectionKind::Gratitude => EntryKind::Gratitude,
            ReflectionKind::Morning => EntryKind::MorningJournal,
            ReflectionKind::Evening => EntryKind::EveningJournal,
        }
    }
}

/// Arguments for the `reflect` command
#[derive(Args)]
pub struct ReflectArgs {
    /// Which reflection to write
    #[arg(value_enum, value_name = "KIND")]
    pub kind: ReflectionKind,

    /// Reflection text
    #[arg(value_name = "CONTENT", required = true, num_args = 1..)]
    pub content: Vec<String>,

    #[command(flatten)]
    pub day: DayArgs,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one setting (theme, language, notifications)
    Set {
        #[arg(value_name = "KEY")]
        key: String,

        #[arg(value_name = "VALUE")]
        value: String,
    },
}

/// Arguments for the `inspire` command
#[derive(Args)]
pub struct InspireArgs {
    #[command(flatten)]
    pub day: DayArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new encrypted journal
    Init(InitArgs),

    /// Show a day: its entries plus carried-over goals, priorities and habits
    View(ViewArgs),

    /// Add an entry
    Add(AddArgs),

    /// Mark an entry complete
    Done(TargetArgs),

    /// Mark an entry incomplete again
    Undo(TargetArgs),

    /// Replace an entry's content
    Edit(EditArgs),

    /// Delete an entry
    Delete(TargetArgs),

    /// Move a task to another day
    Migrate(MigrateArgs),

    /// Write the day's gratitude or morning/evening reflection
    Reflect(ReflectArgs),

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommand>,
    },

    /// Show the inspiration of the day
    Inspire(InspireArgs),

    /// Check journal integrity
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
