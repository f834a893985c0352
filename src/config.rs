use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "FLIGHT_PRICE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_addr")]
    addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ModelConfig {
    #[serde(default = "default_model_path")]
    path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_model_path() -> String {
    "artifacts/flight_price_model.json".to_string()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub model_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(ConfigFile::default())
    }
}

impl From<ConfigFile> for Config {
    fn from(config_file: ConfigFile) -> Self {
        Self {
            addr: config_file.server.addr,
            model_path: config_file.model.path.into(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config_file: ConfigFile =
            toml::from_str(content).context("Failed to parse config file")?;
        Ok(config_file.into())
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(std::env::var(CONFIG_PATH_ENV).ok())
    }

    /// `path` is the value of the override variable, if set.
    fn load_from(path: Option<String>) -> Result<Self> {
        let path = path.unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
        Self::from_file(Path::new(&path))
    }
}
