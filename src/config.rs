//! Runtime configuration read from the environment.
//!
//! `main` loads an optional `.env` file with `dotenv` before calling
//! [`Config::from_env`], so every value can be set either way.

use crate::output::OutputFormat;

/// Environment variable naming the log4rs YAML file.
pub const LOG_CONFIG_VAR: &str = "IPTOOLS_LOG_CONFIG";
/// Environment variable holding the default output format.
pub const OUTPUT_VAR: &str = "IPTOOLS_OUTPUT";
/// Environment variable holding the maximum number of addresses `list` prints.
pub const LIST_LIMIT_VAR: &str = "IPTOOLS_LIST_LIMIT";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
pub const DEFAULT_LIST_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_config_file: String,
    pub output_format: OutputFormat,
    pub list_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config_file: DEFAULT_LOG_CONFIG.to_string(),
            output_format: OutputFormat::Text,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// missing or invalid values.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(file) = lookup(LOG_CONFIG_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_config_file = file.trim().to_string();
        }

        if let Some(format) = lookup(OUTPUT_VAR) {
            match format.parse::<OutputFormat>() {
                Ok(format) => config.output_format = format,
                Err(e) => log::warn!("{OUTPUT_VAR}: {e}, using {}", config.output_format),
            }
        }

        if let Some(limit) = lookup(LIST_LIMIT_VAR) {
            match limit.trim().parse::<usize>() {
                Ok(limit) => config.list_limit = limit,
                Err(e) => log::warn!(
                    "{LIST_LIMIT_VAR}='{limit}': {e}, using {}",
                    config.list_limit
                ),
            }
        }

        log::debug!("Config::from_lookup() => {config:?}");
        config
    }
}
