use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ck", about = concat!("[x] checklist v", env!("CARGO_PKG_VERSION"), " - one line, one item"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a checklist in the current directory
    Init(InitArgs),
    /// Add items, one per non-empty line
    Add(AddArgs),
    /// List items
    List(ListArgs),
    /// Flip an item between checked and unchecked
    Toggle(RefArgs),
    /// Mark an item checked
    Check(RefArgs),
    /// Mark an item unchecked
    Uncheck(RefArgs),
    /// Replace an item's text
    Edit(EditArgs),
    /// Delete items
    Rm(RmArgs),
    /// Move an item to another position
    Mv(MvArgs),
    /// Remove every item
    Clear(ClearArgs),
    /// Show completion progress
    Progress,
    /// Search item text by regex
    Search(SearchArgs),
    /// Write the whole list to a JSON file
    Export(ExportArgs),
    /// Replace the whole list with the contents of a JSON file
    Import(ImportArgs),
    /// Show or change configuration
    Config(ConfigArgs),
    /// View or prune the recovery log
    Recovery(RecoveryCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Checklist name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if checklist/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text; each line becomes an item
    pub text: Vec<String>,
    /// Read items from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which items to show (all, active, completed)
    #[arg(long, short)]
    pub filter: Option<String>,
    /// Show full item ids
    #[arg(long)]
    pub ids: bool,
}

#[derive(Args)]
pub struct RefArgs {
    /// Item position (1-based) or id
    pub item: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item position (1-based) or id
    pub item: String,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Item positions (1-based) or ids
    #[arg(required = true)]
    pub items: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current position (1-based, within the filtered view)
    pub from: usize,
    /// New position (1-based, within the filtered view)
    pub to: usize,
    /// View the positions refer to (all, active, completed)
    #[arg(long, short)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern (case-insensitive)
    pub pattern: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file ("-" for stdout; default: checklist-<date>.json)
    #[arg(long, short)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file to import
    pub file: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Config key (omit to show all)
    pub key: Option<String>,
    /// New value (omit to show the current one)
    pub value: Option<String>,
}

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove every entry, not just those older than 30 days
    #[arg(long)]
    pub all: bool,
}
