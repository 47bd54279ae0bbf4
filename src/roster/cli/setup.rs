use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version)]
#[command(about = "Register, edit, and list students", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the roster and config (defaults to $ROSTER_DATA, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new student
    #[command(alias = "a", display_order = 1)]
    Add {
        /// Full name (letters and spaces)
        #[arg(long)]
        name: String,

        /// Student id (digits, unique)
        #[arg(long)]
        id: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Contact number (at least 10 digits)
        #[arg(long)]
        contact: String,
    },

    /// List registered students
    #[command(alias = "ls", display_order = 2)]
    List {
        /// First row to show when the table is taller than the overflow threshold
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Change a student's details (the id cannot be changed)
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Position of the student in the list (starting at 1)
        position: usize,

        /// New full name
        #[arg(long)]
        name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New contact number
        #[arg(long)]
        contact: Option<String>,
    },

    /// Delete a student
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Position of the student in the list (starting at 1)
        position: usize,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Interactive form for adding and editing students
    #[command(display_order = 5)]
    Shell,

    /// Get or set configuration
    #[command(display_order = 6)]
    Config {
        /// Config key (storage-key, overflow-threshold, confirm-delete)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
