#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Skirmish matches.

mod board;
mod config;
mod script;
mod session;
mod transfer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use skirmish_core::{Event, SavedWorld};
use skirmish_world::World;

use session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn-based grid strategy rule engine", long_about = None)]
struct Cli {
    /// Log at debug level, overriding RUST_LOG.
    #[arg(long, global = true)]
    verbose: bool,
    /// Object catalog as JSON; the built-in catalog is used otherwise.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Scenario as JSON; the built-in scenario is used otherwise.
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,
    /// Overrides the scenario's placement seed.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Set up the scenario, place starting objects and save the result.
    New {
        /// Destination of the save file.
        #[arg(long)]
        out: PathBuf,
    },
    /// Run a scripted match, from a save or from a fresh setup.
    Play {
        /// Script with one instruction per line.
        #[arg(long)]
        script: PathBuf,
        /// Save to continue from.
        #[arg(long)]
        save: Option<PathBuf>,
        /// Destination of the final save.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the board and balances of a save.
    Show {
        #[arg(long)]
        save: PathBuf,
    },
    /// Print a save as a transfer code.
    Export {
        #[arg(long)]
        save: PathBuf,
    },
    /// Turn a transfer code back into a save file.
    Import {
        /// Code printed by `export`.
        #[arg(long)]
        code: String,
        #[arg(long)]
        out: PathBuf,
    },
}

/// Entry point for the Skirmish command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = config::load_catalog(cli.catalog.as_deref())?;
    let scenario = config::load_scenario(cli.scenario.as_deref(), cli.seed)?;

    match cli.cmd {
        Cmd::New { out } => {
            let (session, events) = Session::start(catalog, &scenario)?;
            print_events(&events);
            print!("{}", board::render(session.world()));
            write_save(&out, session.world())
        }
        Cmd::Play { script, save, out } => {
            let text = fs::read_to_string(&script)
                .with_context(|| format!("read {}", script.display()))?;
            let steps = script::parse(&text, &catalog)
                .with_context(|| format!("parse {}", script.display()))?;
            let (mut session, events) = match save {
                Some(path) => {
                    let saved: SavedWorld = config::read_json(&path)?;
                    let mut session = Session::restore(catalog, &scenario, &saved)?;
                    let events = session.resume();
                    (session, events)
                }
                None => Session::start(catalog, &scenario)?,
            };
            print_events(&events);
            print_events(&session.play(&steps));
            print!("{}", board::render(session.world()));
            if let Some(winner) = session.winner() {
                println!("winner: player {}", winner.get());
            }
            match out {
                Some(path) => write_save(&path, session.world()),
                None => Ok(()),
            }
        }
        Cmd::Show { save } => {
            let saved: SavedWorld = config::read_json(&save)?;
            let session = Session::restore(catalog, &scenario, &saved)?;
            print!("{}", board::render(session.world()));
            Ok(())
        }
        Cmd::Export { save } => {
            let saved: SavedWorld = config::read_json(&save)?;
            println!("{}", transfer::encode(&saved).context("encode transfer code")?);
            Ok(())
        }
        Cmd::Import { code, out } => {
            let saved = transfer::decode(&code).context("invalid transfer code")?;
            let session = Session::restore(catalog, &scenario, &saved)?;
            write_save(&out, session.world())
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        let _ = builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.format_timestamp_secs().try_init();
}

fn write_save(path: &Path, world: &World) -> Result<()> {
    let saved = world.save().context("world state is inconsistent")?;
    write_json(path, &saved)
}

fn write_json(path: &Path, saved: &SavedWorld) -> Result<()> {
    let json = serde_json::to_string_pretty(saved).context("serialise save")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!("saved match to {}", path.display());
    Ok(())
}

fn print_events(events: &[Event]) {
    for event in events {
        println!("{}", board::describe(event));
    }
}
