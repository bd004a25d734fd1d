use std::{env, net::IpAddr, path::Path, sync::OnceLock};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::error::AppResult;

/// Settings for one service node.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub distribution: DistributionConfig,
    pub node: NodeConfig,
    pub tracing: TracingConfig,
}

/// Where spans and events go.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum TracingConfig {
    /// Discarded. Used by tests and embedded services.
    Memory,
    Stdout,
}

/// Name and version reported by tracing.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub host_ip: IpAddr,
    /// Seeds the id generator; derived from `host_ip` when not set.
    pub worker_number: u16,
}

/// Names the directory holding `default.toml` and an optional `local.toml`.
const CONFIG_DIR_ENV: &str = "INKPOST_CONFIG_PATH";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "INKPOST";

mod keys {
    pub const VERSION: &str = "distribution.version";
    pub const HOST_IP: &str = "node.host_ip";
    pub const WORKER_NUMBER: &str = "node.worker_number";
}

impl AppConfig {
    /// Process-wide configuration, loaded on first use.
    ///
    /// # Panics
    ///
    /// Panics if [`AppConfig::load`] fails.
    pub fn get() -> &'static Self {
        static CONFIG: OnceLock<AppConfig> = OnceLock::new();
        CONFIG.get_or_init(|| Self::load().unwrap())
    }

    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        match env::var(CONFIG_DIR_ENV) {
            Ok(dir) => Self::load_from(dir),
            Err(_) => Self::load_from(DEFAULT_CONFIG_DIR),
        }
    }

    /// Layers `default`, then `local` if present, then `INKPOST__*`
    /// environment variables found in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from<P: AsRef<Path>>(dir: P) -> AppResult<Self> {
        let dir = dir.as_ref();
        let layered = Config::builder()
            .set_default(keys::VERSION, env!("CARGO_PKG_VERSION"))?
            .add_source(File::with_name(&dir.join("default").to_string_lossy()))
            .add_source(File::with_name(&dir.join("local").to_string_lossy()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(with_derived(&layered)?
            .add_source(layered)
            .build()?
            .try_deserialize()?)
    }
}

/// Defaults computed from already loaded values.
fn with_derived(layered: &Config) -> AppResult<ConfigBuilder<DefaultState>> {
    let builder = Config::builder();
    Ok(match layered.get::<IpAddr>(keys::HOST_IP) {
        Ok(host_ip) => builder.set_default(keys::WORKER_NUMBER, worker_number_for(host_ip))?,
        Err(_) => builder,
    })
}

/// Low 16 bits of the address, unique per host inside a /16.
fn worker_number_for(ip: IpAddr) -> u16 {
    let low = match ip {
        IpAddr::V4(ip) => [ip.octets()[2], ip.octets()[3]],
        IpAddr::V6(ip) => [ip.octets()[14], ip.octets()[15]],
    };
    u16::from_be_bytes(low)
}
