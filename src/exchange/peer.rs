use crate::configuration::timing_configuration::Configuration;
use crate::exchange::communication::line_stream::LineStream;
use crate::exchange::communication::{acceptor, connector};
use crate::exchange::error::ExchangeResult;
use crate::exchange::latency::{DelaySource, UniformDelay};
use crate::exchange::peer_configuration::{PeerConfig, PeerRole};
use crate::exchange::shutdown::ShutdownListener;
use crate::exchange::sink::{ConsoleSink, MessageSink};
use std::thread;
use std::time::Duration;

/**
 * How a peer's exchange loop ended.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    ///The stop condition was reached.
    Completed,
    ///The other peer closed the stream before the stop condition.
    PeerDisconnected,
    ///A shutdown signal arrived during a pause.
    Interrupted,
}

/**
 * Summary of a finished peer run.
 */
#[derive(Debug, Clone)]
pub struct ExchangeReport {
    ///How the exchange loop ended.
    pub outcome: ExchangeOutcome,

    ///Number of receive/respond rounds this peer performed.
    pub rounds: usize,

    ///Last message this peer wrote to the stream.
    pub last_sent: Option<String>,
}

/**
 * Outcome of a single receive/respond round.
 */
enum RoundOutcome {
    ///The round ran to the response send.
    Responded,
    ///The other peer closed the stream before the receive completed.
    Disconnected,
    ///A shutdown signal arrived during the latency pause.
    Interrupted,
}

/**
 * Derives the response to a received message: the received text with
 * this peer's current round count appended. This append is the one
 * algorithmic rule of the exchange.
 *
 * # Arguments
 *
 * `previous` - Received message text.
 *
 * `count` - This peer's current round count.
 */
pub fn derive_response(previous: &str, count: usize) -> String {
    format!("{} {}", previous, count)
}

/**
 * A peer of the exchange. Owns its end of the connection, the role
 * specific loop and its own round counter; nothing is shared with the
 * other peer besides the stream itself. The delay source and the message
 * sink are injected, so the same loop runs with production latency and
 * console output or deterministically under test. The behavior is
 * identical whether the peer is hosted on a thread or in its own
 * process: every input is an explicit constructor argument.
 */
pub struct Peer<D: DelaySource, S: MessageSink> {
    ///Validated startup parameters.
    configuration: PeerConfig,

    ///Pause taken by the initiator before connecting.
    connect_grace: Duration,

    ///Source of the simulated latency pauses.
    delay: D,

    ///Destination of the per-message output.
    sink: S,

    ///Optional signal that interrupts the peer's pauses.
    shutdown: Option<ShutdownListener>,

    ///Exchange rounds counted so far, owned exclusively by this peer.
    count: usize,

    ///Receive/respond rounds actually performed.
    responded: usize,

    ///Last message written to the stream.
    last_sent: Option<String>,
}

impl Peer<UniformDelay, ConsoleSink> {
    /**
     * Builds a peer with the production latency policy and console
     * output.
     *
     * # Arguments
     *
     * `configuration` - Validated startup parameters of this peer.
     *
     * `timing` - Runtime timing parameters.
     */
    pub fn new(configuration: PeerConfig, timing: &Configuration) -> Peer<UniformDelay, ConsoleSink> {
        Peer::with_parts(
            configuration,
            timing.get_connect_grace(),
            UniformDelay::from_latency(&timing.latency),
            ConsoleSink,
        )
    }
}

impl<D: DelaySource, S: MessageSink> Peer<D, S> {
    /**
     * Builds a peer from explicit parts.
     *
     * # Arguments
     *
     * `configuration` - Validated startup parameters of this peer.
     *
     * `connect_grace` - Pause the initiator takes before connecting.
     *
     * `delay` - Source of the simulated latency pauses.
     *
     * `sink` - Destination of the per-message output.
     */
    pub fn with_parts(
        configuration: PeerConfig,
        connect_grace: Duration,
        delay: D,
        sink: S,
    ) -> Peer<D, S> {
        Peer {
            configuration,
            connect_grace,
            delay,
            sink,
            shutdown: None,
            count: 0,
            responded: 0,
            last_sent: None,
        }
    }

    /**
     * Attaches a shutdown listener. A signal on it ends the peer's
     * current or next pause and terminates the loop, the same way a
     * disconnect would.
     *
     * # Arguments
     *
     * `listener` - Listener end of a shutdown channel.
     */
    pub fn with_shutdown(mut self, listener: ShutdownListener) -> Peer<D, S> {
        self.shutdown = Some(listener);
        self
    }

    /**
     * Runs the peer to completion in the calling thread and reports how
     * the exchange ended. Binding, connecting and stream failures are
     * returned as errors; an early disconnect or an interrupted pause
     * ends the loop with the matching outcome instead. The connection is
     * scoped to this call and closed on every exit path.
     */
    pub fn start(mut self) -> ExchangeResult<ExchangeReport> {
        let outcome = match self.configuration.role {
            PeerRole::Responder => self.run_as_responder()?,
            PeerRole::Initiator => self.run_as_initiator()?,
        };

        tracing::info!(
            "{} finished after {} responses ({:?})",
            self.configuration.name,
            self.responded,
            outcome
        );

        Ok(ExchangeReport {
            outcome,
            rounds: self.responded,
            last_sent: self.last_sent,
        })
    }

    /**
     * Runs the responder side: listen, accept one connection, then
     * receive and respond until the stop condition is reached. The count
     * is incremented before the receive, so a full run performs exactly
     * stop_condition rounds.
     */
    fn run_as_responder(&mut self) -> ExchangeResult<ExchangeOutcome> {
        let listener = acceptor::bind(self.configuration.port)?;
        let mut stream = acceptor::accept(&listener)?;

        while self.count < self.configuration.stop_condition {
            self.count += 1;

            match self.exchange_round(&mut stream)? {
                RoundOutcome::Responded => {}
                RoundOutcome::Disconnected => return Ok(ExchangeOutcome::PeerDisconnected),
                RoundOutcome::Interrupted => return Ok(ExchangeOutcome::Interrupted),
            }
        }

        Ok(ExchangeOutcome::Completed)
    }

    /**
     * Runs the initiator side: wait out the connect grace, connect, send
     * the seed message, then receive and respond. The count is checked
     * right after the increment, so the initiator stops before its final
     * receive and performs one respond round less than the responder.
     */
    fn run_as_initiator(&mut self) -> ExchangeResult<ExchangeOutcome> {
        //The grace is a soft ordering assumption, not a synchronization
        //guarantee: the responder is expected to have bound by then
        if self.pause(self.connect_grace) {
            return Ok(ExchangeOutcome::Interrupted);
        }

        let mut stream = connector::connect(&self.configuration.address, self.configuration.port)?;

        let seed_message = self.configuration.seed_message.clone();
        self.send(&mut stream, &seed_message)?;

        loop {
            self.count += 1;

            if self.count >= self.configuration.stop_condition {
                break;
            }

            match self.exchange_round(&mut stream)? {
                RoundOutcome::Responded => {}
                RoundOutcome::Disconnected => return Ok(ExchangeOutcome::PeerDisconnected),
                RoundOutcome::Interrupted => return Ok(ExchangeOutcome::Interrupted),
            }
        }

        Ok(ExchangeOutcome::Completed)
    }

    /**
     * Performs one receive/respond round: receive a line, derive the
     * response from it, pause for the simulated latency and send the
     * response.
     *
     * # Arguments
     *
     * `stream` - Connection to the other peer.
     */
    fn exchange_round(&mut self, stream: &mut LineStream) -> ExchangeResult<RoundOutcome> {
        let received = match stream.recv_line()? {
            Some(line) => line,
            None => {
                tracing::warn!(
                    "stream closed between {} and {}",
                    self.configuration.name,
                    self.configuration.peer_name
                );
                return Ok(RoundOutcome::Disconnected);
            }
        };

        let response = derive_response(&received, self.count);

        //Simulated network latency
        let delay = self.delay.next_delay();
        if self.pause(delay) {
            return Ok(RoundOutcome::Interrupted);
        }

        self.send(stream, &response)?;
        self.responded += 1;

        Ok(RoundOutcome::Responded)
    }

    /**
     * Sends one message and records it on the sink.
     *
     * # Arguments
     *
     * `stream` - Connection to the other peer.
     *
     * `message` - Message text to send.
     */
    fn send(&mut self, stream: &mut LineStream, message: &str) -> ExchangeResult<()> {
        stream.send_line(message)?;

        self.sink.record_sent(
            &self.configuration.name,
            message,
            &self.configuration.peer_name,
        );
        self.last_sent = Some(message.to_string());

        Ok(())
    }

    /**
     * Waits out one pause. Without a shutdown listener the pause is a
     * plain sleep; with one, a signal ends the pause early. Returns true
     * when the pause was interrupted.
     *
     * # Arguments
     *
     * `delay` - Duration of the pause.
     */
    fn pause(&mut self, delay: Duration) -> bool {
        match &self.shutdown {
            Some(listener) => listener.wait(delay),
            None => {
                thread::sleep(delay);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_response_appends_the_current_count() {
        assert_eq!(derive_response("hello", 1), "hello 1");
        assert_eq!(derive_response("hello 1", 1), "hello 1 1");
        assert_eq!(derive_response("hello 1 1 2 2", 3), "hello 1 1 2 2 3");
    }

    #[test]
    fn the_derivation_is_a_plain_append() {
        let previous = "any text, even with spaces";

        assert_eq!(
            derive_response(previous, 7),
            format!("{} {}", previous, 7)
        );
    }
}
