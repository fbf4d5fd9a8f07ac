//! Pong Turns - Unified CLI
//!
//! Inspect formats, render grids and play scripted turns.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use cli::{Cli, Command};
use pong_turns::{
    ClientConfig, CupTag, CupView, Format, HttpTransport, LogTransport, MatchFormatLock,
    MatchState, Multiplier, ShotOutcome, TurnController, TurnPhase, TurnSubmitter, TurnTransport,
    compute_available_formats, resolve_selection,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Formats {
            cups,
            server_format,
            pending,
        } => run_formats(cups, server_format, pending),
        Command::Grid { state, format } => run_grid(&state, format),
        Command::Play {
            state,
            outcome,
            multiplier,
            cups,
            config,
            dry_run,
        } => run_play(state, outcome, multiplier, cups, config, dry_run).await,
    }
}

/// Prints the format menu for a cup count.
#[instrument]
fn run_formats(cups: u32, server_format: Option<Format>, pending: bool) -> Result<()> {
    let available = compute_available_formats(cups);
    let lock = MatchFormatLock::from_server(server_format, cups, pending);
    let choice = resolve_selection(&available, lock, None);

    for format in &choice.options {
        let marker = if *format == choice.selected { '>' } else { ' ' };
        println!("{} {} ({})", marker, format.display_name(), format.wire_name());
    }
    if choice.locked {
        println!("(locked)");
    }
    Ok(())
}

/// Prints both grids of a match-state file.
#[instrument(skip(path), fields(path = %path.display()))]
fn run_grid(path: &Path, format: Option<Format>) -> Result<()> {
    let state = load_state(path)?;
    let selected = format.or(state.their_format).unwrap_or_default();
    let grids = state.grids(selected);

    println!("Opponent ({}):", selected.display_name());
    println!("{}", grids.theirs().display());
    println!();
    println!("Mine ({}):", state.my_format.display_name());
    println!("{}", grids.mine().display());
    Ok(())
}

/// Plays one turn and waits for its submission.
#[instrument(skip_all, fields(outcome = %outcome, dry_run = dry_run))]
async fn run_play(
    state: PathBuf,
    outcome: String,
    multiplier: Option<String>,
    cups: Vec<String>,
    config: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();

    let outcome = ShotOutcome::parse_name(&outcome)
        .ok_or_else(|| anyhow!("Unknown outcome {:?}; expected Centro, Bordo or Miss", outcome))?;
    let multiplier = multiplier
        .map(|name| Multiplier::parse_name(&name).ok_or_else(|| anyhow!("Unknown multiplier {:?}", name)))
        .transpose()?;

    let transport: Arc<dyn TurnTransport> = if dry_run {
        Arc::new(LogTransport)
    } else {
        Arc::new(HttpTransport::new(config.server_url().clone(), config.player().clone()))
    };
    let mut submitter = TurnSubmitter::new(transport, config.delays());
    if !config.prefer_async() {
        submitter = submitter.form_only();
    }

    let mut controller = TurnController::new(load_state(&state)?, submitter);
    info!(format = %controller.format_choice().selected, "Turn started");

    controller.select_outcome(outcome)?;
    if let Some(multiplier) = multiplier.filter(|m| *m != Multiplier::Single) {
        controller.press_multiplier(multiplier)?;
    }
    for cup in &cups {
        if let Err(e) = controller.click_cup(cup) {
            warn!(cup = %cup, error = %e, "Click rejected");
            println!("{}: {}", cup, e);
        }
    }

    let (_, theirs) = controller.cup_views();
    println!("{}", render_views(&theirs));
    println!("{}", controller.instruction());

    if controller.phase() != TurnPhase::Complete {
        bail!("Turn incomplete: {}", controller.instruction());
    }

    for handle in controller.drain_submissions() {
        let delivery = handle.await.context("Submission task failed")??;
        println!("Submitted via {:?}", delivery);
    }
    Ok(())
}

fn load_state(path: &Path) -> Result<MatchState> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match state {}", path.display()))?;
    MatchState::from_json(&json).with_context(|| format!("Failed to parse match state {}", path.display()))
}

fn render_views(rows: &[Vec<CupView>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|view| {
                    let mark = if view.has(CupTag::Eliminated) {
                        '.'
                    } else if view.has(CupTag::Selected) {
                        '*'
                    } else if view.has(CupTag::Pending) {
                        '?'
                    } else {
                        'o'
                    };
                    format!("[{} {}]", mark, view.name)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
