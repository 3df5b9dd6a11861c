use {
    serde::{Deserialize, Serialize},
    std::{env, io, path::Path, str::FromStr},
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub bind_host: String,
    pub udp_port: u16,
    pub websocket_port: u16,
    pub max_datagram_size: usize,
    pub state_channel_size: usize,
    /// Snapshots buffered per subscriber before a slow one starts skipping.
    pub broadcast_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel {
                inner: tracing::Level::INFO,
            },
            bind_host: "0.0.0.0".into(),
            udp_port: 53000,
            websocket_port: 8080,
            max_datagram_size: 2048,
            state_channel_size: 1024,
            broadcast_capacity: 64,
        }
    }
}

impl Config {
    /// Reads the config from `SCORE_RELAY_CONFIG_PATH` or `./config.json`,
    /// falling back to the defaults when there is no such file.
    pub fn read() -> Result<Self, io::Error> {
        let path = match env::var("SCORE_RELAY_CONFIG_PATH") {
            Ok(path) => Path::new(&path).to_path_buf(),
            Err(_) => env::current_dir()?.join("config.json"),
        };
        let string = match std::fs::read_to_string(path) {
            Ok(string) => string,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e),
        };
        let config: Self = serde_json::from_str(&string)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel {
    pub inner: tracing::Level,
}

impl TryFrom<String> for LogLevel {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        value.inner.to_string()
    }
}

impl FromStr for LogLevel {
    type Err = tracing::metadata::ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tracing::Level::from_str(s).map(|inner| Self { inner })
    }
}
