//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Form builder core: typed fields, multi-step forms and a shared validation engine
#[derive(Parser, Debug)]
#[command(name = "formforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Override the storage directory for this invocation
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and save a new form
    New {
        /// Form title
        #[arg(short, long)]
        title: Option<String>,

        /// Form description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Start in multi-step mode (one initial step)
        #[arg(long)]
        multi_step: bool,
    },

    /// List saved forms
    List,

    /// Show a saved form (fields, steps, settings)
    Show {
        /// Form identifier
        form_id: String,
    },

    /// Export a form as a JSON document
    Export {
        /// Form identifier
        form_id: String,

        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Import a form from a JSON document and save it
    Import {
        /// Form document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the share link for a form
    Share {
        /// Form identifier
        form_id: String,
    },

    /// Fill a form with answers from a JSON file and record the submission
    Fill {
        /// Form identifier
        form_id: String,

        /// JSON object keyed by field id
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        data: PathBuf,
    },

    /// List recorded submissions
    Submissions {
        /// Only submissions for this form
        #[arg(short, long)]
        form: Option<String>,
    },

    /// Delete a saved form
    Delete {
        /// Form identifier
        form_id: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}
