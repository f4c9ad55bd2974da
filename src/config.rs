//! Service configuration parsed from environment variables.

use whiteboard::{DEFAULT_WHITEBOARD_AGENT, ReplayConfig};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CACHE_ROOMS: usize = 256;
pub const DEFAULT_MAX_MESSAGES: usize = 10_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub replay: ReplayConfig,
    /// Rooms whose replay is memoized at once; the oldest room is evicted first.
    pub cache_rooms: usize,
    /// Largest history accepted in a single request.
    pub max_messages: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            replay: ReplayConfig::default(),
            cache_rooms: DEFAULT_CACHE_ROOMS,
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

impl AppConfig {
    /// Build typed service config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `WHITEBOARD_AGENT_NAME`: default `화이트보드`
    /// - `REPLAY_CACHE_ROOMS`: default 256
    /// - `REPLAY_MAX_MESSAGES`: default 10000
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;

        let whiteboard_agent = match lookup("WHITEBOARD_AGENT_NAME") {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::Invalid { var: "WHITEBOARD_AGENT_NAME", value: name });
            }
            Some(name) => name.trim().to_owned(),
            None => DEFAULT_WHITEBOARD_AGENT.to_owned(),
        };

        let cache_rooms = parse_var(&lookup, "REPLAY_CACHE_ROOMS", DEFAULT_CACHE_ROOMS)?;
        if cache_rooms == 0 {
            return Err(ConfigError::Zero { var: "REPLAY_CACHE_ROOMS" });
        }
        let max_messages = parse_var(&lookup, "REPLAY_MAX_MESSAGES", DEFAULT_MAX_MESSAGES)?;
        if max_messages == 0 {
            return Err(ConfigError::Zero { var: "REPLAY_MAX_MESSAGES" });
        }

        Ok(Self { port, replay: ReplayConfig::new(whiteboard_agent), cache_rooms, max_messages })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
