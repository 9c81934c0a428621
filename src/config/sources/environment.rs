//! Environment overrides: BLOX_DEMO__<SECTION>__<KEY>, e.g. BLOX_DEMO__HTTP__TIMEOUT_SECS=30

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("BLOX_DEMO")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
