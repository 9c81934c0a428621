//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::config::{
    default_program, default_scheduler_host, default_state_service_host, default_timeout_secs,
};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("cloud.program", default_program())?
        .set_default("http.timeout_secs", default_timeout_secs())?
        .set_default("hosts.scheduler", default_scheduler_host())?
        .set_default("hosts.state_service", default_state_service_host())
}
