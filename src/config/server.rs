// Host settings for the bundled server binary
// The middleware itself is configured programmatically through StaticConfig

use super::StaticConfig;
use serde::Deserialize;
use std::net::SocketAddr;

/// Settings of the demo host
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub server: ListenConfig,
    pub logging: LoggingConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    pub root: String,
    #[serde(default)]
    pub allow_list: Vec<String>,
    #[serde(default)]
    pub wildcard: bool,
    pub base_dir: Option<String>,
}

impl ServerSettings {
    /// Load settings from specified file path (without extension)
    ///
    /// Sources in increasing priority: built-in defaults, the optional file,
    /// `SERVER_*` environment variables (e.g. `SERVER_SERVER__PORT`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("assets.root", "static")?
            .set_default("assets.wildcard", false)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("assets.allow_list")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

impl AssetsConfig {
    pub fn to_static_config(&self) -> StaticConfig {
        let cfg = StaticConfig::new(&self.root, &self.allow_list, self.wildcard);
        match &self.base_dir {
            Some(dir) => cfg.with_base_dir(dir),
            None => cfg,
        }
    }
}
