//! Two-player message exchange binary.
//!
//! With no subcommand it prompts for the run parameters and launches the
//! peer pair; the peer subcommand runs a single peer and is the target
//! the separate-process mode re-invokes.

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use volley::configuration::timing_configuration::{self, Configuration};
use volley::exchange::peer::Peer;
use volley::exchange::peer_configuration::{PeerConfig, PeerRole};
use volley::launcher::runner;
use volley::launcher::setup::{self, LaunchMode};

/**
 * Two-player message exchange over TCP.
 */
#[derive(Parser, Debug)]
#[command(name = "volley")]
#[command(about = "Two-player message exchange over TCP")]
#[command(version)]
struct Cli {
    ///Path to the TOML timing configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    ///Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    ///Run a single peer; the separate-process mode re-invokes this.
    Peer(PeerArgs),
}

/**
 * Startup parameters of a single peer, required together.
 */
#[derive(Args, Debug)]
struct PeerArgs {
    ///This peer's display name.
    #[arg(long)]
    name: String,

    ///The other peer's display name.
    #[arg(long)]
    peer_name: String,

    ///Port the responder listens on and the initiator connects to.
    #[arg(long)]
    port: u16,

    ///Address of the responder.
    #[arg(long, default_value = "localhost")]
    address: String,

    ///Seed message the initiator sends first.
    #[arg(long)]
    seed: String,

    ///Act as the initiator instead of the responder.
    #[arg(long)]
    initiator: bool,

    ///Number of exchange rounds after which the peer stops.
    #[arg(long)]
    rounds: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Cli {
        config, command, ..
    } = cli;

    let timing = match &config {
        Some(path) => {
            timing_configuration::read_configuration_file(path.to_string_lossy().into_owned())?
        }
        None => Configuration::default(),
    };

    match command {
        Some(Command::Peer(arguments)) => run_single_peer(arguments, &timing),
        None => run_setup(config.as_ref(), &timing),
    }
}

/**
 * Runs one peer to completion in this process.
 */
fn run_single_peer(arguments: PeerArgs, timing: &Configuration) -> Result<(), Box<dyn Error>> {
    let role = if arguments.initiator {
        PeerRole::Initiator
    } else {
        PeerRole::Responder
    };

    let configuration = PeerConfig::new(
        arguments.name,
        arguments.peer_name,
        arguments.port,
        arguments.address,
        arguments.seed,
        role,
        arguments.rounds,
    )?;

    let report = Peer::new(configuration, timing).start()?;

    tracing::info!(
        "exchange ended: {:?} after {} responses",
        report.outcome,
        report.rounds
    );

    Ok(())
}

/**
 * Prompts for the run parameters and launches the peer pair in the
 * chosen mode.
 */
fn run_setup(
    configuration_file: Option<&PathBuf>,
    timing: &Configuration,
) -> Result<(), Box<dyn Error>> {
    let setup = setup::prompt()?;

    match setup.mode {
        LaunchMode::Threads => runner::run_in_threads(&setup, timing),
        LaunchMode::Processes => runner::run_in_processes(&setup, timing, configuration_file),
    }
}
