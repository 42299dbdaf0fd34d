// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (default: <config dir>/notesboard/config.toml)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Notes API base URL, overrides the config file
    #[arg(short, long, value_name = "URL", env = "NOTESBOARD_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes with ID, title and first line of the body
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a note through the form
    Add {
        /// Note title
        #[arg(short, long)]
        title: String,

        /// Note body
        #[arg(short, long)]
        body: String,
    },

    /// Delete a note by ID
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Render the notes page and open it in the browser
    Page {
        /// Write the page to this file instead of opening the browser
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Interactive session with the form and list attached
    Shell,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
