//! Explicit config file source named by BLOX_DEMO_CONFIG. The file must exist when set.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;

use crate::config::ConfigLoader;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match std::env::var(ConfigLoader::CONFIG_ENV) {
        Ok(path) if !path.is_empty() => {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "{} points to a missing file: {}",
                    ConfigLoader::CONFIG_ENV,
                    path.display()
                )));
            }
            Ok(builder.add_source(File::from(path.as_path()).required(true)))
        }
        _ => Ok(builder),
    }
}
