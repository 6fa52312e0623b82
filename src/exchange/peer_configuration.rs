use crate::exchange::error::ExchangeError;

/**
 * Role a peer plays in the exchange.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerRole {
    ///Connects to the responder and sends the seed message first.
    Initiator,
    ///Listens for the initiator's connection and only ever replies.
    Responder,
}

/**
 * Startup parameters of a single peer. The parameters form one atomic
 * unit: the constructor validates all of them together and a partial or
 * inconsistent set is rejected. Once built, the configuration is never
 * mutated.
 */
#[derive(Debug, Clone)]
pub struct PeerConfig {
    ///This peer's display name.
    pub name: String,

    ///The other peer's display name.
    pub peer_name: String,

    ///Port the responder listens on and the initiator connects to.
    pub port: u16,

    ///Address of the responder, used when connecting.
    pub address: String,

    ///First message sent by the initiator, unprompted by any received one.
    pub seed_message: String,

    ///Role this peer plays.
    pub role: PeerRole,

    ///Number of exchange rounds after which the peer's loop ends.
    pub stop_condition: usize,
}

impl PeerConfig {
    /**
     * Validates and builds the configuration of a single peer.
     *
     * # Arguments
     *
     * `name` - This peer's display name.
     *
     * `peer_name` - The other peer's display name.
     *
     * `port` - Port the responder listens on and the initiator connects to.
     *
     * `address` - Address of the responder.
     *
     * `seed_message` - First message sent by the initiator.
     *
     * `role` - Role this peer plays.
     *
     * `stop_condition` - Number of exchange rounds before stopping.
     */
    pub fn new(
        name: String,
        peer_name: String,
        port: u16,
        address: String,
        seed_message: String,
        role: PeerRole,
        stop_condition: usize,
    ) -> Result<PeerConfig, ExchangeError> {
        if name.is_empty() || peer_name.is_empty() {
            return Err(ExchangeError::Configuration(
                "peer names must not be empty".to_string(),
            ));
        }

        if address.is_empty() {
            return Err(ExchangeError::Configuration(
                "address must not be empty".to_string(),
            ));
        }

        if seed_message.trim().is_empty() {
            return Err(ExchangeError::Configuration(
                "seed message must not be empty".to_string(),
            ));
        }

        if seed_message.contains('\n') {
            return Err(ExchangeError::Configuration(
                "seed message must be a single line".to_string(),
            ));
        }

        if stop_condition < 1 {
            return Err(ExchangeError::Configuration(
                "stop condition must be at least 1".to_string(),
            ));
        }

        Ok(PeerConfig {
            name,
            peer_name,
            port,
            address,
            seed_message,
            role,
            stop_condition,
        })
    }
}
