//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CubicLauncher - desktop game launcher front-end
#[derive(Parser, Debug)]
#[command(name = "cubiclauncher")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// List all instances
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all instances, most recently played first
    List,

    /// Add a new instance
    Add {
        /// Instance name
        name: String,
        /// Game version
        #[arg(short, long)]
        game_version: String,
        /// Mod loader (Vanilla, Fabric, Forge, Quilt)
        #[arg(short, long, default_value = "Vanilla")]
        loader: String,
        /// Loader version (defaults to the game version, the vanilla convention)
        #[arg(long)]
        loader_version: Option<String>,
    },

    /// Delete an instance by name
    Delete {
        /// Instance name
        name: String,
    },

    /// Duplicate an instance under a new name
    Duplicate {
        /// Existing instance name
        name: String,
        /// Name for the copy
        new_name: String,
    },

    /// Bulk-add instances from a JSON file
    Import {
        /// Path to a JSON array of instances
        path: PathBuf,
    },

    /// Show the built-in seed instances
    Reset,
}
