//! CLI route: run context and the header → resolve → run sequence every script follows.

use crate::args::{resolve, Prompter};
use crate::commands::Script;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::http::HttpInvoker;
use crate::process::CloudCli;
use std::io::Write;
use tracing::debug;

/// Configuration and invokers available to a running script.
pub struct RunContext<'a> {
    pub config: &'a DemoConfig,
    pub cloud: &'a dyn CloudCli,
    pub http: &'a dyn HttpInvoker,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a DemoConfig, cloud: &'a dyn CloudCli, http: &'a dyn HttpInvoker) -> Self {
        Self {
            config,
            cloud,
            http,
        }
    }

    /// Print the header, resolve parameters from `raw_args` (program name first),
    /// then run the script. Nothing is invoked if resolution fails.
    pub fn execute(
        &self,
        script: &dyn Script,
        raw_args: &[String],
        prompter: &mut dyn Prompter,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        writeln!(out, "== Blox Demo CLI - {} ==\n", script.description())?;
        out.flush()?;

        let specs = script.options(raw_args, self.config);
        let params = resolve(script.description(), &specs, raw_args, prompter)?;
        writeln!(out, "\n")?;

        debug!(script = script.name(), "Running script");
        script.run(&params, self, out)
    }
}
