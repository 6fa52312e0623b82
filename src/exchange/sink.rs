use crossbeam::Sender;

/**
 * Destination for the observable per-message output. The peer records
 * exactly one event per sent message; the sink decides the presentation,
 * keeping the exchange loop free of any console coupling.
 */
pub trait MessageSink: Send {
    /**
     * Records a message this peer just sent.
     *
     * # Arguments
     *
     * `name` - Sender's display name.
     *
     * `message` - Message text as written to the stream.
     *
     * `peer_name` - Recipient's display name.
     */
    fn record_sent(&mut self, name: &str, message: &str, peer_name: &str);
}

/**
 * Prints each sent message to the console.
 */
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn record_sent(&mut self, name: &str, message: &str, peer_name: &str) {
        println!("{}: \"{}\" -> {}", name, message, peer_name);
    }
}

/**
 * Forwards the raw text of each sent message over a channel, so a test
 * or a collector on the other end can assert the exact exchange.
 */
pub struct ChannelSink {
    ///Sender end of the capture channel.
    channel: Sender<String>,
}

impl ChannelSink {
    /**
     * Wraps the sender end of a capture channel.
     *
     * # Arguments
     *
     * `channel` - Channel the sent messages are forwarded into.
     */
    pub fn new(channel: Sender<String>) -> ChannelSink {
        ChannelSink { channel }
    }
}

impl MessageSink for ChannelSink {
    fn record_sent(&mut self, _name: &str, message: &str, _peer_name: &str) {
        let _ = self.channel.send(message.to_string());
    }
}
