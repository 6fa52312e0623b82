//! A two-player message exchange service over a single TCP stream.
extern crate crossbeam;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;
/**
 * Timing and runtime configuration.
 */
pub mod configuration;
/**
 * Peer roles, transport and the exchange loop.
 */
pub mod exchange;
/**
 * Runs a peer pair in threads or in separate processes.
 */
pub mod launcher;
