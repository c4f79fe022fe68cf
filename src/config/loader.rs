use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::settings::{LogFormat, LoggingConfig, ServiceConfig};

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("cannot read config file {}", path.as_ref().display()))?;
    let mut config: ServiceConfig = serde_yaml::from_str(&raw)?;

    // Apply defaults
    if config.logging.is_none() {
        config.logging = Some(LoggingConfig {
            level: "info".to_owned(),
            format: LogFormat::Compact,
        });
    }

    // Validate server address
    if config.server.host.is_empty() {
        bail!("server.host must not be empty");
    }
    if config.server.port.parse::<u16>().is_err() {
        bail!("server.port '{}' is not a valid port", config.server.port);
    }

    Ok(config)
}
