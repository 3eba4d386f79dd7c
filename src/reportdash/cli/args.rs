use clap::{Args, Parser, Subcommand};
use reportdash::filter::{CategoryFilter, StatusFilter};
use reportdash::model::{Category, Priority};

#[derive(Parser, Debug)]
#[command(name = "reportdash", version)]
#[command(about = "Clinical report dashboard with AI-assisted drafting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Filters shared by every command that works on the filtered view.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive match on title or patient name
    #[arg(short, long)]
    pub search: Option<String>,

    /// general, cardiology, neurology, orthopedics, dermatology or all
    #[arg(short, long)]
    pub category: Option<CategoryFilter>,

    /// draft, completed, reviewed or all
    #[arg(long)]
    pub status: Option<StatusFilter>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List reports in the filtered view
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show a single report
    #[command(alias = "v")]
    View {
        /// Report id
        id: String,
    },

    /// Move a report between two positions of the filtered view
    #[command(alias = "mv")]
    Move {
        /// Position shown by `list` (1-based)
        from: usize,

        /// Position to move it to (1-based)
        to: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Generate a draft report from a short description
    Draft {
        /// What the report should cover
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Use the framing of a medical specialty
        #[arg(long)]
        specialty: Option<Category>,

        /// Save the draft as a new report
        #[arg(long, requires_all = ["title", "patient_name", "patient_id"])]
        save: bool,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        patient_name: Option<String>,

        #[arg(long)]
        patient_id: Option<String>,

        #[arg(long)]
        priority: Option<Priority>,
    },

    /// Summarize a stored report
    Summarize {
        /// Report id
        id: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., model)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
