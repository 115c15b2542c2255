use clap::{Args, Parser, Subcommand, ValueEnum};
use noteminder_core::{Feedback, NoteId};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum StoreKind {
    Json,
    Memory,
}

#[derive(Debug, Parser, Clone)]
#[command(name = "noteminder", version, about = "Notes with a spaced-repetition reviewer")]
pub struct Cli {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Json)]
    pub store: StoreKind,

    /// JSON data file (defaults to the app data dir)
    #[arg(long, env = "NOTEMINDER_DATA")]
    pub data_file: Option<PathBuf>,

    /// Number of timestamped backups to keep
    #[arg(long, default_value_t = 10)]
    pub backups: usize,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Note operations
    #[command(subcommand)]
    Note(NoteCmd),
    /// Case-insensitive search across title, content and tags
    Search { query: String },
    /// List every tag in use
    Tags,
    /// Notes carrying exactly this tag
    Tag { name: String },
    /// Interactive review loop
    Review(ReviewCmd),
    /// Pick one note to review (due first, otherwise random)
    Pick,
    /// Record review feedback for a note
    Feedback { id: NoteId, feedback: Feedback },
    /// Notes due today, oldest first
    Due,
    /// Collection statistics
    Stats,
    /// Export notes
    #[command(subcommand)]
    Export(ExportCmd),
    /// Replace all notes with the contents of a JSON export
    Import { path: PathBuf },
    /// Launch Terminal UI
    Tui,
}

#[derive(Debug, Subcommand, Clone)]
pub enum NoteCmd {
    Add(NoteAdd),
    List,
    Show { id: NoteId },
    Edit(NoteEditArgs),
    Rm { id: NoteId },
}

#[derive(Debug, Args, Clone)]
pub struct NoteAdd {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    /// Comma separated
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct NoteEditArgs {
    pub id: NoteId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// Comma separated; replaces the existing tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    #[arg(long, default_value_t = 20)]
    pub max: usize,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf },
}
