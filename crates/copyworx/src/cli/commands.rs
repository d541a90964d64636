//! Command-line argument definitions.

use super::inputs::parse_key_value;
use clap::{Parser, Subcommand};
use copyworx_core::{LogFormat, RedoPolicy};
use std::path::PathBuf;

/// CopyWorx command-line interface.
#[derive(Parser, Debug)]
#[command(name = "copyworx")]
#[command(about = "Generate multi-section marketing copy one approved section at a time")]
#[command(version)]
pub struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true, env = "COPYWORX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Section table file (overrides the configured template)
    #[arg(long, global = true)]
    pub template_file: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Log output format (pretty or json)
    #[arg(long, global = true, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sections of a table
    Sections {
        /// Built-in table name
        #[arg(long)]
        template: Option<String>,
    },

    /// Start a new session
    Start {
        /// Form input as key=value (repeatable)
        #[arg(short, long = "input", value_parser = parse_key_value)]
        inputs: Vec<(String, String)>,

        /// JSON or TOML file of form inputs
        #[arg(long)]
        inputs_file: Option<PathBuf>,

        /// Session id (a random UUID when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Built-in table name
        #[arg(long)]
        template: Option<String>,
    },

    /// Generate the section at the cursor
    Generate {
        /// Session id
        id: String,

        /// Approve the generated section immediately
        #[arg(long)]
        approve: bool,
    },

    /// Show session progress and section content
    Show {
        /// Session id
        id: String,

        /// Print the prompt for the next section instead
        #[arg(long)]
        prompt: bool,

        /// Print the raw session JSON
        #[arg(long, conflicts_with = "prompt")]
        json: bool,
    },

    /// Replace the content of a generated section
    Edit {
        /// Session id
        id: String,

        /// Section index (0-based)
        index: usize,

        /// New HTML content
        #[arg(long, conflicts_with = "file")]
        html: Option<String>,

        /// Read the new content from a file (stdin when neither is given)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Approve the current section and advance the cursor
    Approve {
        /// Session id
        id: String,
    },

    /// Reopen an approved section
    Redo {
        /// Session id
        id: String,

        /// Section index (0-based)
        index: usize,

        /// keep-cursor or rewind (defaults to the configured policy)
        #[arg(long)]
        policy: Option<RedoPolicy>,
    },

    /// Discard all generated content and start over with the same inputs
    Reset {
        /// Session id
        id: String,
    },

    /// Join the approved sections into the final document
    Assemble {
        /// Session id
        id: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List stored sessions
    List {
        /// Only sessions using this table
        #[arg(long)]
        template: Option<String>,

        /// Only complete sessions
        #[arg(long, conflicts_with = "open")]
        complete: bool,

        /// Only sessions still in progress
        #[arg(long)]
        open: bool,

        /// Maximum number of sessions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a stored session
    Delete {
        /// Session id
        id: String,
    },
}
