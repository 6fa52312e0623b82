use crossbeam::crossbeam_channel::unbounded;
use crossbeam::crossbeam_channel::RecvTimeoutError;
use crossbeam::{Receiver, Sender};
use std::time::Duration;

/**
 * Creates a connected shutdown handle/listener pair. The handle stays
 * with the caller that may want to interrupt the peer; the listener is
 * handed to the peer, which waits out its pauses on it.
 */
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownListener) {
    let (signal_send, signal_recv) = unbounded::<()>();

    (
        ShutdownHandle {
            channel: signal_send,
        },
        ShutdownListener {
            channel: signal_recv,
        },
    )
}

/**
 * Caller's end of the shutdown signal.
 */
pub struct ShutdownHandle {
    ///Sender end of the signal channel.
    channel: Sender<()>,
}

impl ShutdownHandle {
    /**
     * Interrupts the peer's current or next pause.
     */
    pub fn signal(&self) {
        let _ = self.channel.send(());
    }
}

/**
 * Peer's end of the shutdown signal.
 */
pub struct ShutdownListener {
    ///Receiver end of the signal channel.
    channel: Receiver<()>,
}

impl ShutdownListener {
    /**
     * Waits out one pause. Returns true if a signal arrived before the
     * pause completed. A dropped handle counts as a signal, so a caller
     * that wants the peer to run to completion keeps its handle alive
     * until the peer is joined.
     *
     * # Arguments
     *
     * `delay` - Duration of the pause.
     */
    pub fn wait(&self, delay: Duration) -> bool {
        match self.channel.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_pause_completes_without_a_signal() {
        let (_handle, listener) = shutdown_channel();

        assert!(!listener.wait(Duration::from_millis(5)));
    }

    #[test]
    fn a_signal_interrupts_the_pause() {
        let (handle, listener) = shutdown_channel();
        handle.signal();

        assert!(listener.wait(Duration::from_secs(60)));
    }

    #[test]
    fn a_dropped_handle_interrupts_the_pause() {
        let (handle, listener) = shutdown_channel();
        drop(handle);

        assert!(listener.wait(Duration::from_secs(60)));
    }
}
