use crate::configuration::timing_configuration::Configuration;
use crate::exchange::error::ExchangeError;
use crate::exchange::peer::{ExchangeReport, Peer};
use crate::exchange::peer_configuration::{PeerConfig, PeerRole};
use crate::launcher::setup::ExchangeSetup;
use std::error::Error;
use std::path::PathBuf;
use std::process::Command;
use std::thread;
use std::time::Duration;

///Display name of the initiating peer.
pub const INITIATOR_NAME: &str = "Player 1";

///Display name of the responding peer.
pub const RESPONDER_NAME: &str = "Player 2";

///Head start given to the responder process before the initiator spawns.
const PROCESS_HEAD_START: Duration = Duration::from_millis(500);

/**
 * Builds the configuration pair for one run: the initiator and the
 * responder, pointed at each other on localhost.
 *
 * # Arguments
 *
 * `setup` - Parameters collected by the interactive setup.
 *
 * `timing` - Runtime timing parameters.
 */
fn peer_configurations(
    setup: &ExchangeSetup,
    timing: &Configuration,
) -> Result<(PeerConfig, PeerConfig), ExchangeError> {
    let initiator = PeerConfig::new(
        INITIATOR_NAME.to_string(),
        RESPONDER_NAME.to_string(),
        timing.port,
        "localhost".to_string(),
        setup.seed_message.clone(),
        PeerRole::Initiator,
        setup.stop_condition,
    )?;

    let responder = PeerConfig::new(
        RESPONDER_NAME.to_string(),
        INITIATOR_NAME.to_string(),
        timing.port,
        "localhost".to_string(),
        setup.seed_message.clone(),
        PeerRole::Responder,
        setup.stop_condition,
    )?;

    Ok((initiator, responder))
}

/**
 * Runs both peers as threads of this process and waits for both of them
 * before declaring the run complete. Completion of one peer does not
 * force completion of the other.
 *
 * # Arguments
 *
 * `setup` - Parameters collected by the interactive setup.
 *
 * `timing` - Runtime timing parameters.
 */
pub fn run_in_threads(setup: &ExchangeSetup, timing: &Configuration) -> Result<(), Box<dyn Error>> {
    let (initiator_configuration, responder_configuration) = peer_configurations(setup, timing)?;

    tracing::info!("starting both peers in this process");

    let responder_handle = spawn_peer(responder_configuration, timing)?;
    let initiator_handle = spawn_peer(initiator_configuration, timing)?;

    let mut failed = false;

    for handle in vec![initiator_handle, responder_handle] {
        match handle.join() {
            Ok(Ok(report)) => log_report(&report),
            Ok(Err(error)) => {
                failed = true;
                report_peer_error(&error);
            }
            Err(_) => {
                failed = true;
                tracing::error!("a peer thread panicked");
            }
        }
    }

    if failed {
        return Err("the exchange did not complete".into());
    }

    println!("\nExchange completed successfully.");

    Ok(())
}

/**
 * Spawns one peer on a named thread with the configured stack size.
 */
fn spawn_peer(
    configuration: PeerConfig,
    timing: &Configuration,
) -> Result<thread::JoinHandle<Result<ExchangeReport, ExchangeError>>, Box<dyn Error>> {
    let thread_name = format!("peer_thread_{}", configuration.name);
    let builder = thread::Builder::new()
        .name(thread_name)
        .stack_size(timing.thread_stack_size);

    let timing = timing.clone();
    let handle = builder.spawn(move || Peer::new(configuration, &timing).start())?;

    Ok(handle)
}

/**
 * Runs each peer as a separate OS process by re-invoking this executable
 * with the peer subcommand, responder first, and waits for both children
 * to exit before declaring the run complete. The children inherit the
 * console.
 *
 * # Arguments
 *
 * `setup` - Parameters collected by the interactive setup.
 *
 * `timing` - Runtime timing parameters.
 *
 * `configuration_file` - Timing file forwarded to the children, if any.
 */
pub fn run_in_processes(
    setup: &ExchangeSetup,
    timing: &Configuration,
    configuration_file: Option<&PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let executable = std::env::current_exe()?;

    tracing::info!("starting both peers as separate processes");

    let mut responder = Command::new(&executable)
        .args(peer_arguments(
            RESPONDER_NAME,
            INITIATOR_NAME,
            false,
            setup,
            timing,
            configuration_file,
        ))
        .spawn()?;

    //Giving the responder process a head start to bind its listener
    thread::sleep(PROCESS_HEAD_START);

    let mut initiator = Command::new(&executable)
        .args(peer_arguments(
            INITIATOR_NAME,
            RESPONDER_NAME,
            true,
            setup,
            timing,
            configuration_file,
        ))
        .spawn()?;

    let initiator_status = initiator.wait()?;
    let responder_status = responder.wait()?;

    if !initiator_status.success() || !responder_status.success() {
        return Err("a peer process exited with a failure".into());
    }

    println!("\nExchange completed successfully.");

    Ok(())
}

/**
 * Builds the peer subcommand arguments for one child process.
 */
fn peer_arguments(
    name: &str,
    peer_name: &str,
    initiator: bool,
    setup: &ExchangeSetup,
    timing: &Configuration,
    configuration_file: Option<&PathBuf>,
) -> Vec<String> {
    let mut arguments = Vec::new();

    if let Some(path) = configuration_file {
        arguments.push("--config".to_string());
        arguments.push(path.to_string_lossy().into_owned());
    }

    arguments.push("peer".to_string());
    arguments.push("--name".to_string());
    arguments.push(name.to_string());
    arguments.push("--peer-name".to_string());
    arguments.push(peer_name.to_string());
    arguments.push("--port".to_string());
    arguments.push(timing.port.to_string());
    arguments.push("--address".to_string());
    arguments.push("localhost".to_string());
    arguments.push("--seed".to_string());
    arguments.push(setup.seed_message.clone());
    arguments.push("--rounds".to_string());
    arguments.push(setup.stop_condition.to_string());

    if initiator {
        arguments.push("--initiator".to_string());
    }

    arguments
}

/**
 * Logs the outcome of one finished peer.
 */
fn log_report(report: &ExchangeReport) {
    tracing::info!(
        "peer finished: {:?} after {} responses",
        report.outcome,
        report.rounds
    );
}

/**
 * Surfaces a failed peer, with guidance when the port could not be
 * bound.
 */
fn report_peer_error(error: &ExchangeError) {
    tracing::error!("{}", error);

    if let ExchangeError::Bind { port, .. } = error {
        println!(
            "The port {} is already in use. Free it or change the port in the \
             configuration file, then start the exchange again.",
            port
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::setup::LaunchMode;

    #[test]
    fn the_configuration_pair_points_the_peers_at_each_other() {
        let setup = ExchangeSetup {
            seed_message: "hello".to_string(),
            stop_condition: 3,
            mode: LaunchMode::Threads,
        };
        let timing = Configuration::default();

        let (initiator, responder) = peer_configurations(&setup, &timing).unwrap();

        assert_eq!(initiator.role, PeerRole::Initiator);
        assert_eq!(responder.role, PeerRole::Responder);
        assert_eq!(initiator.peer_name, responder.name);
        assert_eq!(responder.peer_name, initiator.name);
        assert_eq!(initiator.port, responder.port);
    }

    #[test]
    fn the_child_arguments_carry_the_whole_configuration() {
        let setup = ExchangeSetup {
            seed_message: "hello".to_string(),
            stop_condition: 3,
            mode: LaunchMode::Processes,
        };
        let timing = Configuration::default();

        let arguments = peer_arguments(INITIATOR_NAME, RESPONDER_NAME, true, &setup, &timing, None);

        assert_eq!(arguments[0], "peer");
        assert!(arguments.contains(&"--initiator".to_string()));
        assert!(arguments.contains(&"hello".to_string()));
        assert!(arguments.contains(&timing.port.to_string()));

        let responder_arguments =
            peer_arguments(RESPONDER_NAME, INITIATOR_NAME, false, &setup, &timing, None);

        assert!(!responder_arguments.contains(&"--initiator".to_string()));
    }
}
