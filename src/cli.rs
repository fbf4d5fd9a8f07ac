//! Command-line interface for pong_turns.

use clap::{Parser, Subcommand};
use pong_turns::Format;
use std::path::PathBuf;

/// Pong Turns - Turn resolution and submission for beer-pong scoring
#[derive(Parser, Debug)]
#[command(name = "pong_turns")]
#[command(about = "Resolve beer-pong turns and submit them to a scoring server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the opponent formats available for a cup count
    Formats {
        /// Opponent cups remaining
        #[arg(short, long)]
        cups: u32,

        /// Opponent format already recorded by the server (wire name)
        #[arg(long)]
        server_format: Option<Format>,

        /// An opponent cup is awaiting re-hit
        #[arg(long)]
        pending: bool,
    },

    /// Render both grids from a match-state JSON file
    Grid {
        /// Path to the match-state JSON file
        #[arg(short, long)]
        state: PathBuf,

        /// Opponent format to preview (wire name)
        #[arg(short, long)]
        format: Option<Format>,
    },

    /// Play one scripted turn against a match-state JSON file
    Play {
        /// Path to the match-state JSON file
        #[arg(short, long)]
        state: PathBuf,

        /// Shot outcome: Centro, Bordo or Miss
        #[arg(short, long)]
        outcome: String,

        /// Shot multiplier (Doppio, Triplo, ... or Double, Triple, ...)
        #[arg(short, long)]
        multiplier: Option<String>,

        /// Cup to click, in order (repeatable)
        #[arg(long = "cup")]
        cups: Vec<String>,

        /// Path to the client config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log the submission instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
}
