/**
 * Spawns the peer pair in threads or in separate processes.
 */
pub mod runner;
/**
 * Interactive collection of the run parameters.
 */
pub mod setup;
