use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::time::Duration;

/**
 * Wrapper for the runtime configurations.
*/
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    ///Stack size of the spawned peer threads in bytes.
    pub thread_stack_size: usize,

    ///Port the responder listens on and the initiator connects to.
    pub port: u16,

    ///Pause in milliseconds taken by the initiator before connecting,
    ///giving the responder time to bind its listener.
    pub connect_grace: u64,

    ///Bounds of the simulated latency pause before each response.
    pub latency: Latency,
}

impl Configuration {
    /**
     * Returns the connect grace wrapped in a Duration.
     */
    pub fn get_connect_grace(&self) -> Duration {
        Duration::from_millis(self.connect_grace)
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            thread_stack_size: 2 * 1024 * 1024,
            port: 3000,
            connect_grace: 300,
            latency: Latency {
                lower: 500,
                upper: 2500,
            },
        }
    }
}

/**
 * Bounds in milliseconds of the uniformly random pause a peer takes
 * before sending each response.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Latency {
    ///Lower bound of the pause in milliseconds, inclusive.
    pub lower: u64,

    ///Upper bound of the pause in milliseconds, exclusive.
    pub upper: u64,
}

impl Latency {
    /**
     * Returns the lower bound wrapped in a Duration.
     */
    pub fn get_lower(&self) -> Duration {
        Duration::from_millis(self.lower)
    }

    /**
     * Returns the upper bound wrapped in a Duration.
     */
    pub fn get_upper(&self) -> Duration {
        Duration::from_millis(self.upper)
    }
}

/**
 * Reads the runtime configuration from a TOML file.
 * An error is returned if not successful.
 *
 * # Arguments
 *
 * `configuration_file_path` - path to the TOML configuration file.
 */
pub fn read_configuration_file(
    configuration_file_path: String,
) -> Result<Configuration, Box<dyn Error>> {
    let mut configuration_string = String::new();
    let mut file = File::open(configuration_file_path)?;

    file.read_to_string(&mut configuration_string)?;
    let configuration: Configuration = toml::from_str(&configuration_string)?;

    if configuration.latency.lower >= configuration.latency.upper {
        return Err(format!(
            "latency.lower ({}) must be below latency.upper ({})",
            configuration.latency.lower, configuration.latency.upper
        )
        .into());
    }

    Ok(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn default_matches_the_production_policy() {
        let configuration = Configuration::default();

        assert_eq!(configuration.port, 3000);
        assert_eq!(configuration.connect_grace, 300);
        assert_eq!(configuration.latency.lower, 500);
        assert_eq!(configuration.latency.upper, 2500);
    }

    #[test]
    fn parses_a_full_configuration_file() {
        let configuration: Configuration = toml::from_str(
            r#"
            thread_stack_size = 1048576
            port = 4000
            connect_grace = 250

            [latency]
            lower = 100
            upper = 200
            "#,
        )
        .unwrap();

        assert_eq!(configuration.thread_stack_size, 1048576);
        assert_eq!(configuration.port, 4000);
        assert_eq!(configuration.get_connect_grace(), Duration::from_millis(250));
        assert_eq!(configuration.latency.get_lower(), Duration::from_millis(100));
        assert_eq!(configuration.latency.get_upper(), Duration::from_millis(200));
    }

    #[test]
    fn rejects_inverted_latency_bounds() {
        let path = env::temp_dir().join("volley_inverted_latency.toml");
        fs::write(
            &path,
            r#"
            thread_stack_size = 1048576
            port = 4000
            connect_grace = 250

            [latency]
            lower = 300
            upper = 300
            "#,
        )
        .unwrap();

        let result = read_configuration_file(path.to_string_lossy().into_owned());
        let _ = fs::remove_file(&path);

        assert!(result.is_err());
    }
}
