use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "foobs", about = concat!("foobs v", env!("CARGO_PKG_VERSION"), " - counters and captions as plain text files"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different target list file
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List targets
    List(ListArgs),
    /// Show one target
    Show(ShowArgs),
    /// Add a target file
    Add(AddArgs),
    /// Change a target's path, name or type
    Edit(EditArgs),
    /// Replace a target's content
    Set(SetArgs),
    /// Increment an integer target
    Inc(StepArgs),
    /// Decrement an integer target
    Dec(StepArgs),
    /// Remove a target
    Rm(RmArgs),
    /// Move a target to a new position
    Mv(MvArgs),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
    /// Show or change settings
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only show targets whose name or path matches this regex
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Target number (as shown by `foobs list`)
    pub number: usize,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Path to the text file
    pub path: String,
    /// Display name (default: the file name without extension)
    #[arg(long)]
    pub name: Option<String>,
    /// Target type: string or integer
    #[arg(long = "type", default_value = "string", value_name = "TYPE")]
    pub kind: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Target number
    pub number: usize,
    /// New file path (content is re-read from it)
    #[arg(long)]
    pub path: Option<String>,
    /// New display name
    #[arg(long)]
    pub name: Option<String>,
    /// New type: string or integer
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct SetArgs {
    /// Target number
    pub number: usize,
    /// New content
    pub text: String,
}

#[derive(Args)]
pub struct StepArgs {
    /// Target number
    pub number: usize,
    /// Amount to step by
    #[arg(default_value = "1", allow_negative_numbers = true)]
    pub delta: i64,
}

#[derive(Args)]
pub struct RmArgs {
    /// Target number
    pub number: usize,
    /// Also delete the file from disk
    #[arg(long)]
    pub delete_file: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Target number to move
    pub from: usize,
    /// Position to move it to
    pub to: usize,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Set a key, e.g. `foobs config set ui.big_step 5`
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Dotted key (ui.big_step, ui.colors.background, files.extensions, log.level)
    pub key: String,
    /// New value
    pub value: String,
}
