use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::driver::RchConfig;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub rch: RchAppConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            rch: RchAppConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;

    fn from_env() -> Self {
        let host_value =
            env_string("LOADPLAN_API_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, effective_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                eprintln!(
                    "⚠️ Could not parse LOADPLAN_API_HOST ('{}'): {}. Using {}.",
                    host_value,
                    err,
                    Self::DEFAULT_HOST
                );
                (
                    Self::DEFAULT_HOST
                        .parse::<IpAddr>()
                        .expect("Default host must be valid"),
                    Self::DEFAULT_HOST.to_string(),
                )
            }
        };

        let port = match env_string("LOADPLAN_API_PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(value) if value != 0 => value,
                Ok(_) => {
                    eprintln!(
                        "⚠️ LOADPLAN_API_PORT must not be 0. Using {}.",
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse LOADPLAN_API_PORT ('{}'): {}. Using {}.",
                        raw, err, Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
            },
            None => Self::DEFAULT_PORT,
        };

        Self {
            bind_ip,
            display_host: effective_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }

    /// Checks whether the hostname matches the default value.
    pub fn uses_default_host(&self) -> bool {
        self.display_host == Self::DEFAULT_HOST
    }
}

/// Configuration for the RCH engine's tunables.
#[derive(Clone, Debug)]
pub struct RchAppConfig {
    iterations: usize,
    seed: u64,
}

impl RchAppConfig {
    const DEFAULT_ITERATIONS: usize = RchConfig::DEFAULT_ITERATIONS;

    const ITERATIONS_VAR: &'static str = "LOADPLAN_RCH_ITERATIONS";
    const SEED_VAR: &'static str = "LOADPLAN_RCH_SEED";

    fn from_env() -> Self {
        let iterations = match env_string(Self::ITERATIONS_VAR) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(value) if value > 0 => value,
                Ok(_) => {
                    eprintln!(
                        "⚠️ {} must be greater than 0. Using {}.",
                        Self::ITERATIONS_VAR,
                        Self::DEFAULT_ITERATIONS
                    );
                    Self::DEFAULT_ITERATIONS
                }
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse {} ('{}') as a number: {}. Using {}.",
                        Self::ITERATIONS_VAR,
                        raw,
                        err,
                        Self::DEFAULT_ITERATIONS
                    );
                    Self::DEFAULT_ITERATIONS
                }
            },
            None => Self::DEFAULT_ITERATIONS,
        };

        let seed = match env_string(Self::SEED_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(value) => value,
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse {} ('{}') as a number: {}. Using a freshly generated seed.",
                        Self::SEED_VAR,
                        raw,
                        err
                    );
                    rand::random()
                }
            },
            None => rand::random(),
        };

        Self { iterations, seed }
    }

    /// Returns the configured `RchConfig` to hand to the engine.
    pub fn rch_config(&self) -> RchConfig {
        RchConfig::new(self.iterations, self.seed)
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            eprintln!(
                "⚠️ Access to {} failed: {}. Using default value.",
                name, err
            );
            None
        }
    }
}
