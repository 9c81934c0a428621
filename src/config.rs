//! Configuration System
//!
//! Layered configuration for the demo tools: built-in defaults, an optional user-level
//! config file, an optional file named by `BLOX_DEMO_CONFIG`, and `BLOX_DEMO__*`
//! environment overrides. With nothing configured the tools behave exactly as their
//! defaults describe (`aws` on the PATH, 60 second HTTP timeout, local endpoints).

use crate::error::DemoError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    /// External cloud CLI settings
    #[serde(default)]
    pub cloud: CloudConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Default endpoints for the local services
    #[serde(default)]
    pub hosts: HostsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Executable invoked for cloud API calls
    #[serde(default = "default_program")]
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsConfig {
    /// Blox scheduler `<host>:<port>`
    #[serde(default = "default_scheduler_host")]
    pub scheduler: String,

    /// Cluster state service `<host>:<port>`
    #[serde(default = "default_state_service_host")]
    pub state_service: String,
}

pub(crate) fn default_program() -> String {
    "aws".to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    crate::http::DEFAULT_TIMEOUT.as_secs()
}

pub(crate) fn default_scheduler_host() -> String {
    "localhost:2000".to_string()
}

pub(crate) fn default_state_service_host() -> String {
    "localhost:3000".to_string()
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            scheduler: default_scheduler_host(),
            state_service: default_state_service_host(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DemoConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.cloud.program.trim().is_empty() {
            errors.push("cloud.program cannot be empty".to_string());
        }
        if self.http.timeout_secs == 0 {
            errors.push("http.timeout_secs must be greater than zero".to_string());
        }
        if self.hosts.scheduler.trim().is_empty() {
            errors.push("hosts.scheduler cannot be empty".to_string());
        }
        if self.hosts.state_service.trim().is_empty() {
            errors.push("hosts.state_service cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`DemoConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Environment variable naming an extra config file.
    pub const CONFIG_ENV: &'static str = "BLOX_DEMO_CONFIG";

    /// Load configuration from defaults, the global file, `BLOX_DEMO_CONFIG` and
    /// `BLOX_DEMO__*` environment variables (highest precedence last).
    pub fn load() -> Result<DemoConfig, DemoError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::override_file::add_to_builder(builder)?;
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<DemoConfig, DemoError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(config::File::from(path).required(true));
        Self::finish(builder.build()?)
    }

    fn finish(settings: config::Config) -> Result<DemoConfig, DemoError> {
        let config: DemoConfig = settings.try_deserialize()?;
        config.validate().map_err(|errors| {
            DemoError::Config(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
