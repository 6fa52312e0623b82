use crate::configuration::timing_configuration::Latency;
use rand::Rng;
use std::time::Duration;

/**
 * Source of the simulated latency pauses a peer takes before sending
 * each response. The policy is injected into the peer so production
 * runs draw random pauses while tests run deterministically.
 */
pub trait DelaySource: Send {
    /**
     * Returns the duration of the next pause.
     */
    fn next_delay(&mut self) -> Duration;
}

/**
 * Uniformly random pause in [lower, upper).
 */
pub struct UniformDelay {
    ///Lower bound of the pause, inclusive.
    lower: Duration,

    ///Upper bound of the pause, exclusive.
    upper: Duration,
}

impl UniformDelay {
    /**
     * Builds the delay source from the configured latency bounds.
     *
     * # Arguments
     *
     * `latency` - Bounds of the pause in milliseconds.
     */
    pub fn from_latency(latency: &Latency) -> UniformDelay {
        UniformDelay {
            lower: latency.get_lower(),
            upper: latency.get_upper(),
        }
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        let millis = rand::thread_rng().gen_range(self.lower.as_millis()..self.upper.as_millis());

        Duration::from_millis(millis as u64)
    }
}

/**
 * Fixed pause, for deterministic runs and tests.
 */
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_delay_stays_within_its_bounds() {
        let latency = Latency {
            lower: 500,
            upper: 2500,
        };
        let mut delay = UniformDelay::from_latency(&latency);

        for _ in 0..1000 {
            let pause = delay.next_delay();

            assert!(pause >= Duration::from_millis(500));
            assert!(pause < Duration::from_millis(2500));
        }
    }

    #[test]
    fn fixed_delay_returns_its_duration() {
        let mut delay = FixedDelay(Duration::from_millis(42));

        assert_eq!(delay.next_delay(), Duration::from_millis(42));
    }
}
